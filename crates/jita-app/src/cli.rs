use std::path::PathBuf;

use clap::Parser;
use jita_config::Config;
use jita_config::paths::PathsConfig;
use jita_types::Level;

/// Scrape edewakaru.com verb pairs into data/*.json and images/
#[derive(Debug, Parser)]
#[command(name = "jita-scrape", version)]
pub struct ScrapeArgs {
    /// Scrape the beginner level only
    #[arg(long, conflicts_with = "level")]
    pub beginner: bool,

    /// Scrape a single level (beginner, intermediate, advanced, other)
    #[arg(long)]
    pub level: Option<Level>,

    /// Output root holding data/ and images/
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl ScrapeArgs {
    pub fn level(&self) -> Option<Level> {
        if self.beginner {
            Some(Level::Beginner)
        } else {
            self.level
        }
    }

    pub fn apply(&self, config: Config) -> Config {
        let mut config = config.with_level(self.level());
        if let Some(root) = &self.root {
            config.paths = PathsConfig::at(root);
        }
        config
    }
}

/// Sync scraped verb pairs into Anki through AnkiConnect
#[derive(Debug, Parser)]
#[command(name = "jita-sync", version)]
pub struct SyncArgs {
    /// Only sync this level's file instead of all.json
    pub level: Option<Level>,

    /// Refresh fields of notes that already exist
    #[arg(long)]
    pub update: bool,

    /// Directory holding data/ and images/
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// AnkiConnect endpoint
    #[arg(long, value_name = "URL")]
    pub anki_url: Option<String>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl SyncArgs {
    pub fn apply(&self, config: Config) -> Config {
        let mut config = config.with_level(self.level);
        if let Some(root) = &self.root {
            config.paths = PathsConfig::at(root);
        }
        if let Some(url) = &self.anki_url {
            config.anki.url = url.clone();
        }
        config.anki.update_existing |= self.update;
        config
    }
}
