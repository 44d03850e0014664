use std::collections::BTreeMap;

use async_trait::async_trait;
use jita_core::Result;
use serde::Serialize;

use crate::template::NoteType;

/// The AnkiConnect actions the sync relies on
#[async_trait]
pub trait AnkiApi: Send + Sync {
    /// AnkiConnect protocol version; doubles as the reachability check
    async fn version(&self) -> Result<u32>;

    async fn deck_names(&self) -> Result<Vec<String>>;

    async fn create_deck(&self, deck: &str) -> Result<u64>;

    /// Model (note type) names
    async fn model_names(&self) -> Result<Vec<String>>;

    async fn create_model(&self, note_type: &NoteType) -> Result<()>;

    /// Store base64 `data` as `filename` in the media folder; returns the stored name
    async fn store_media_file(&self, filename: &str, data: &str) -> Result<String>;

    async fn find_notes(&self, query: &NoteQuery) -> Result<Vec<u64>>;

    /// Fails with `Error::Duplicate` when Anki rejects the note as a duplicate
    async fn add_note(&self, note: &Note) -> Result<u64>;

    async fn update_note_fields(&self, id: u64, fields: &BTreeMap<String, String>) -> Result<()>;
}

/// Notes of one type in one deck whose key field equals `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub deck: String,
    pub model: String,
    pub key_field: String,
    pub key: String,
}

impl NoteQuery {
    /// Anki search syntax, e.g. `"deck:Japanese::Verb Pairs" "note:..." "VerbPairID:開く\_開ける"`
    pub fn to_search(&self) -> String {
        format!(
            "\"deck:{}\" \"note:{}\" \"{}:{}\"",
            escape_search(&self.deck),
            escape_search(&self.model),
            self.key_field,
            escape_search(&self.key)
        )
    }
}

/// `_` and `*` are wildcards in Anki searches
fn escape_search(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: BTreeMap<String, String>,
    pub options: NoteOptions,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            allow_duplicate: false,
            duplicate_scope: "deck".to_string(),
        }
    }
}
