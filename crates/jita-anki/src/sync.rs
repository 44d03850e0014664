use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jita_config::Config;
use jita_core::{DataStore, Error, Result};
use jita_types::VerbPair;

use crate::api::{AnkiApi, Note, NoteOptions, NoteQuery};
use crate::fields::note_fields;
use crate::template::NoteKind;

const TAGS: [&str; 2] = ["verb-pair", "edewakaru"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub pairs: usize,
    pub added: usize,
    pub updated: usize,
    /// Already present; skipped
    pub duplicates: usize,
    pub failed: usize,
    pub media_stored: usize,
}

/// Pushes scraped pairs into Anki, one note per pair and note type
pub struct Syncer<A: AnkiApi> {
    api: A,
    config: Config,
}

impl<A: AnkiApi> Syncer<A> {
    pub fn new(api: A, config: Config) -> Self {
        Self { api, config }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    /// Sync `all.json`, or the configured level's file.
    /// Reachability is checked before anything is read. Deck and note type
    /// setup failures abort; per-note failures are counted and skipped.
    pub async fn run(&self) -> Result<SyncReport> {
        let version = self.api.version().await?;
        tracing::info!("Connected to AnkiConnect version {}", version);

        let store = DataStore::new(self.config.paths.clone());
        let pairs = store.load(self.config.level)?;
        tracing::info!("Syncing {} verb pairs to Anki", pairs.len());

        self.ensure_deck().await?;
        self.ensure_note_types().await?;

        let mut report = SyncReport {
            pairs: pairs.len(),
            ..SyncReport::default()
        };
        for pair in &pairs {
            self.sync_pair(pair, &mut report).await;
        }

        tracing::info!(
            "Sync complete: {} added, {} updated, {} duplicates, {} failed",
            report.added,
            report.updated,
            report.duplicates,
            report.failed
        );
        Ok(report)
    }

    async fn ensure_deck(&self) -> Result<()> {
        let deck = &self.config.anki.deck;
        if self.api.deck_names().await?.contains(deck) {
            tracing::info!("Deck exists: {}", deck);
        } else {
            self.api.create_deck(deck).await?;
            tracing::info!("Created deck: {}", deck);
        }
        Ok(())
    }

    async fn ensure_note_types(&self) -> Result<()> {
        let existing = self.api.model_names().await?;
        for kind in NoteKind::ALL {
            let name = kind.model_name();
            if existing.iter().any(|m| m == name) {
                tracing::info!("Note type exists: {}", name);
                continue;
            }
            self.api.create_model(&kind.note_type()).await?;
            tracing::info!("Created note type: {}", name);
        }
        Ok(())
    }

    async fn sync_pair(&self, pair: &VerbPair, report: &mut SyncReport) {
        let image = self.store_image(pair).await;
        if image.is_some() {
            report.media_stored += 1;
        }
        let fields = note_fields(pair, image.as_deref());

        for kind in NoteKind::ALL {
            match self.upsert_note(pair, kind, &fields).await {
                Ok(Upsert::Added(id)) => {
                    tracing::info!("Added {} ({}): note {}", pair.id, kind.model_name(), id);
                    report.added += 1;
                }
                Ok(Upsert::Updated) => {
                    tracing::info!("Updated {} ({})", pair.id, kind.model_name());
                    report.updated += 1;
                }
                Err(Error::Duplicate(reason)) => {
                    tracing::info!(
                        "Duplicate {} ({}), skipping: {}",
                        pair.id,
                        kind.model_name(),
                        reason
                    );
                    report.duplicates += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed {} ({}): {}", pair.id, kind.model_name(), e);
                    report.failed += 1;
                }
            }
        }
    }

    async fn upsert_note(
        &self,
        pair: &VerbPair,
        kind: NoteKind,
        fields: &BTreeMap<String, String>,
    ) -> Result<Upsert> {
        let note_type = kind.note_type();
        let query = NoteQuery {
            deck: self.config.anki.deck.clone(),
            model: note_type.name.clone(),
            key_field: note_type.key_field().to_string(),
            key: pair.id.clone(),
        };

        if let Some(&id) = self.api.find_notes(&query).await?.first() {
            if !self.config.anki.update_existing {
                return Err(Error::Duplicate(format!("note {id} already exists")));
            }
            self.api.update_note_fields(id, fields).await?;
            return Ok(Upsert::Updated);
        }

        let mut tags: Vec<String> = vec![format!("level:{}", pair.level)];
        tags.extend(TAGS.iter().map(|t| t.to_string()));

        let note = Note {
            deck_name: self.config.anki.deck.clone(),
            model_name: note_type.name,
            fields: fields.clone(),
            options: NoteOptions::default(),
            tags,
        };
        self.api.add_note(&note).await.map(Upsert::Added)
    }

    /// Upload the pair's illustration; `None` if it has none or the upload failed
    async fn store_image(&self, pair: &VerbPair) -> Option<String> {
        let relative = pair.image_path.as_deref()?;
        let file_name = pair.image_file_name()?;
        let path = self.config.paths.resolve(relative);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Image for {} unreadable at {}: {}", pair.id, path.display(), e);
                return None;
            }
        };

        match self.api.store_media_file(file_name, &STANDARD.encode(bytes)).await {
            Ok(stored) if !stored.is_empty() => Some(stored),
            Ok(_) => Some(file_name.to_string()),
            Err(e) => {
                tracing::warn!("Failed to store media {} for {}: {}", file_name, pair.id, e);
                None
            }
        }
    }
}

enum Upsert {
    Added(u64),
    Updated,
}
