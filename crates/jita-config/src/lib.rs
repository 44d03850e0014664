use serde::{Deserialize, Serialize};

use jita_types::Level;

use self::anki::AnkiConfig;
use self::paths::PathsConfig;
use self::scraper::ScraperConfig;

pub mod anki;
pub mod paths;
pub mod scraper;

/// Everything both programs need, built once and passed down explicitly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub scraper: ScraperConfig,
    pub anki: AnkiConfig,
    /// Restrict a run to one level; `None` means every level
    #[serde(default)]
    pub level: Option<Level>,
}

impl Config {
    /// Read the environment (after loading `.env`, if any)
    pub fn from_env() -> Self {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::new()
    }

    pub fn new() -> Self {
        Config {
            paths: PathsConfig::new(),
            scraper: ScraperConfig::new(),
            anki: AnkiConfig::new(),
            level: None,
        }
    }

    pub fn with_level(mut self, level: Option<Level>) -> Self {
        self.level = level;
        self
    }

    /// Levels selected for this run, in output order
    pub fn levels(&self) -> Vec<Level> {
        match self.level {
            Some(level) => vec![level],
            None => Level::ALL.to_vec(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an env var, falling back to `default` when unset or malformed
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_filter() {
        let config = Config::new();
        assert_eq!(config.levels(), Level::ALL.to_vec());

        let config = config.with_level(Some(Level::Beginner));
        assert_eq!(config.levels(), vec![Level::Beginner]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::new().with_level(Some(Level::Advanced));
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, Some(Level::Advanced));
        assert_eq!(back.anki.deck, config.anki.deck);
    }
}
