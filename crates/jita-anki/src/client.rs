use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use jita_config::anki::AnkiConfig;
use jita_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{AnkiApi, Note, NoteQuery};
use crate::template::NoteType;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    version: u32,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(config: &AnkiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::network("http client", e))?;

        Ok(Self {
            base_url: config.url.clone(),
            version: config.version,
            client,
        })
    }

    /// Invoke an AnkiConnect API action
    async fn invoke<T>(&self, action: &str, params: serde_json::Value) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action,
            version: self.version,
            params,
        };

        tracing::debug!("AnkiConnect {}", action);
        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::network(
                    &self.base_url,
                    format!("cannot reach AnkiConnect, is Anki running with the add-on installed? ({e})"),
                )
            })?;

        let body: AnkiResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::parse(format!("AnkiConnect {action} response"), e.to_string()))?;

        body.into_result(action)
    }

    /// For actions whose result is `null` on success
    async fn invoke_unit(&self, action: &str, params: serde_json::Value) -> Result<()> {
        let _: Option<serde_json::Value> = self.invoke(action, params).await?;
        Ok(())
    }
}

#[async_trait]
impl AnkiApi for AnkiConnectClient {
    async fn version(&self) -> Result<u32> {
        self.invoke("version", json!({})).await
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        self.invoke("deckNames", json!({})).await
    }

    async fn create_deck(&self, deck: &str) -> Result<u64> {
        self.invoke("createDeck", json!({ "deck": deck })).await
    }

    async fn model_names(&self) -> Result<Vec<String>> {
        self.invoke("modelNames", json!({})).await
    }

    async fn create_model(&self, note_type: &NoteType) -> Result<()> {
        self.invoke_unit("createModel", note_type.create_model_params())
            .await
    }

    async fn store_media_file(&self, filename: &str, data: &str) -> Result<String> {
        self.invoke("storeMediaFile", json!({ "filename": filename, "data": data }))
            .await
    }

    async fn find_notes(&self, query: &NoteQuery) -> Result<Vec<u64>> {
        self.invoke("findNotes", json!({ "query": query.to_search() }))
            .await
    }

    async fn add_note(&self, note: &Note) -> Result<u64> {
        self.invoke("addNote", json!({ "note": note })).await
    }

    async fn update_note_fields(&self, id: u64, fields: &BTreeMap<String, String>) -> Result<()> {
        self.invoke_unit("updateNoteFields", json!({ "note": { "id": id, "fields": fields } }))
            .await
    }
}

#[derive(Serialize)]
struct AnkiRequest<'a> {
    action: &'a str,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T>
where
    T: for<'de> Deserialize<'de>,
{
    fn into_result(self, action: &str) -> Result<T> {
        if let Some(error) = self.error {
            if error.contains("duplicate") {
                return Err(Error::Duplicate(error));
            }
            return Err(Error::Remote {
                action: action.to_string(),
                message: error,
            });
        }

        match self.result {
            Some(result) => Ok(result),
            // `null` is a valid result for unit-like targets such as Option<Value>
            None => serde_json::from_value(serde_json::Value::Null).map_err(|_| Error::Remote {
                action: action.to_string(),
                message: "AnkiConnect returned null result".to_string(),
            }),
        }
    }
}
