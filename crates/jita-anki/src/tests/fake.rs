use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use jita_core::{Error, Result};

use crate::api::{AnkiApi, Note, NoteQuery};
use crate::template::NoteType;

#[derive(Debug, Clone)]
pub struct StoredNote {
    pub id: u64,
    pub deck: String,
    pub model: String,
    pub fields: BTreeMap<String, String>,
    pub tags: Vec<String>,
}

#[derive(Default)]
pub struct State {
    pub decks: Vec<String>,
    pub models: Vec<NoteType>,
    pub notes: Vec<StoredNote>,
    pub media: HashMap<String, String>,
    pub calls: Vec<&'static str>,
}

/// In-memory AnkiConnect
#[derive(Default)]
pub struct FakeAnki {
    pub state: Mutex<State>,
    /// Every call fails like a closed port
    pub offline: bool,
    /// `findNotes` always comes back empty, so only `addNote` sees duplicates
    pub blind_search: bool,
    /// `addNote` rejects notes of this model
    pub broken_model: Option<String>,
}

impl FakeAnki {
    fn call(&self, action: &'static str) -> Result<std::sync::MutexGuard<'_, State>> {
        if self.offline {
            return Err(Error::network(
                "http://localhost:8765",
                "cannot reach AnkiConnect (connection refused)",
            ));
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(action);
        Ok(state)
    }

    pub fn note_count(&self) -> usize {
        self.state.lock().unwrap().notes.len()
    }

    pub fn calls(&self, action: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == action)
            .count()
    }
}

#[async_trait]
impl AnkiApi for FakeAnki {
    async fn version(&self) -> Result<u32> {
        self.call("version").map(|_| 6)
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        Ok(self.call("deckNames")?.decks.clone())
    }

    async fn create_deck(&self, deck: &str) -> Result<u64> {
        let mut state = self.call("createDeck")?;
        state.decks.push(deck.to_string());
        Ok(state.decks.len() as u64)
    }

    async fn model_names(&self) -> Result<Vec<String>> {
        Ok(self
            .call("modelNames")?
            .models
            .iter()
            .map(|m| m.name.clone())
            .collect())
    }

    async fn create_model(&self, note_type: &NoteType) -> Result<()> {
        let mut state = self.call("createModel")?;
        if state.models.iter().any(|m| m.name == note_type.name) {
            return Err(Error::Remote {
                action: "createModel".into(),
                message: "Model name already exists".into(),
            });
        }
        state.models.push(note_type.clone());
        Ok(())
    }

    async fn store_media_file(&self, filename: &str, data: &str) -> Result<String> {
        let mut state = self.call("storeMediaFile")?;
        state.media.insert(filename.to_string(), data.to_string());
        Ok(filename.to_string())
    }

    async fn find_notes(&self, query: &NoteQuery) -> Result<Vec<u64>> {
        let state = self.call("findNotes")?;
        if self.blind_search {
            return Ok(Vec::new());
        }
        Ok(state
            .notes
            .iter()
            .filter(|n| {
                n.deck == query.deck
                    && n.model == query.model
                    && n.fields.get(&query.key_field) == Some(&query.key)
            })
            .map(|n| n.id)
            .collect())
    }

    async fn add_note(&self, note: &Note) -> Result<u64> {
        let mut state = self.call("addNote")?;

        if self.broken_model.as_deref() == Some(note.model_name.as_str()) {
            return Err(Error::Remote {
                action: "addNote".into(),
                message: "field contents are malformed".into(),
            });
        }
        if !state.models.iter().any(|m| m.name == note.model_name) {
            return Err(Error::Remote {
                action: "addNote".into(),
                message: format!("model was not found: {}", note.model_name),
            });
        }

        let model = state
            .models
            .iter()
            .find(|m| m.name == note.model_name)
            .cloned()
            .unwrap();
        let key = note.fields.get(model.key_field());
        let duplicate = state.notes.iter().any(|n| {
            n.deck == note.deck_name
                && n.model == note.model_name
                && n.fields.get(model.key_field()) == key
        });
        if duplicate {
            return Err(Error::Duplicate(
                "cannot create note because it is a duplicate".into(),
            ));
        }

        let id = 1000 + state.notes.len() as u64;
        state.notes.push(StoredNote {
            id,
            deck: note.deck_name.clone(),
            model: note.model_name.clone(),
            fields: note.fields.clone(),
            tags: note.tags.clone(),
        });
        Ok(id)
    }

    async fn update_note_fields(&self, id: u64, fields: &BTreeMap<String, String>) -> Result<()> {
        let mut state = self.call("updateNoteFields")?;
        let note = state
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::Remote {
                action: "updateNoteFields".into(),
                message: "note was not found".into(),
            })?;
        note.fields = fields.clone();
        Ok(())
    }
}
