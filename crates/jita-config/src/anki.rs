use serde::{Deserialize, Serialize};

use crate::env_or;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnkiConfig {
    /// AnkiConnect URL
    pub url: String,
    /// Target deck, created if absent
    pub deck: String,
    /// AnkiConnect protocol version sent with every request
    pub version: u32,
    pub timeout_seconds: u64,
    /// Refresh fields of notes that already exist instead of skipping them
    #[serde(default)]
    pub update_existing: bool,
}

impl AnkiConfig {
    pub fn new() -> Self {
        Self {
            url: std::env::var("ANKI_CONNECT_URL")
                .unwrap_or_else(|_| "http://localhost:8765".to_string()),
            deck: std::env::var("ANKI_DECK")
                .unwrap_or_else(|_| "Japanese::Verb Pairs".to_string()),
            version: 6,
            timeout_seconds: env_or("ANKI_TIMEOUT_SECONDS", 10),
            update_existing: false,
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self::new()
    }
}
