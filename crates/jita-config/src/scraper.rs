use std::time::Duration;

use serde::{Deserialize, Serialize};

use jita_types::Level;

use crate::env_or;

const DEFAULT_BASE_URL: &str = "https://www.edewakaru.com";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

fn default_attribution() -> String {
    "Source: edewakaru.com (絵でわかる日本語)".to_string()
}

/// Category index page per level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUrls {
    pub beginner: Option<String>,
    pub intermediate: Option<String>,
    pub advanced: Option<String>,
    /// The site has no fixed category for this one
    pub other: Option<String>,
}

impl CategoryUrls {
    fn new(base_url: &str) -> Self {
        let category = |var: &str, id: u32| {
            Some(
                std::env::var(var)
                    .unwrap_or_else(|_| format!("{base_url}/archives/cat_{id}.html")),
            )
        };

        Self {
            beginner: category("JITA_BEGINNER_URL", 116824),
            intermediate: category("JITA_INTERMEDIATE_URL", 116825),
            advanced: category("JITA_ADVANCED_URL", 116826),
            other: std::env::var("JITA_OTHER_URL").ok(),
        }
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        match level {
            Level::Beginner => self.beginner.as_deref(),
            Level::Intermediate => self.intermediate.as_deref(),
            Level::Advanced => self.advanced.as_deref(),
            Level::Other => self.other.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Relative links are resolved against this
    pub base_url: String,
    pub categories: CategoryUrls,
    /// Pause before every page request
    pub request_delay_ms: u64,
    /// Pause before every image request
    pub image_delay_ms: u64,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub accept_language: String,
    pub max_examples: usize,
    pub max_practice_questions: usize,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl ScraperConfig {
    pub fn new() -> Self {
        let base_url = std::env::var("JITA_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            categories: CategoryUrls::new(&base_url),
            base_url,
            request_delay_ms: env_or("JITA_REQUEST_DELAY_MS", 1000),
            image_delay_ms: env_or("JITA_IMAGE_DELAY_MS", 500),
            timeout_seconds: env_or("JITA_HTTP_TIMEOUT_SECONDS", 30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "ja,en-US;q=0.9,en;q=0.8".to_string(),
            max_examples: 3,
            max_practice_questions: 10,
            attribution: default_attribution(),
        }
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn image_delay(&self) -> Duration {
        Duration::from_millis(self.image_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_cover_three_site_levels() {
        let urls = CategoryUrls::new("https://example.test");
        assert!(urls.get(Level::Beginner).is_some());
        assert!(urls.get(Level::Intermediate).is_some());
        assert!(urls.get(Level::Advanced).is_some());
    }

    #[test]
    fn durations_come_from_millis() {
        let mut config = ScraperConfig::new();
        config.request_delay_ms = 250;
        assert_eq!(config.request_delay(), Duration::from_millis(250));
    }
}
