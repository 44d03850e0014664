mod api;
mod client;
mod fields;
mod sync;
mod template;

pub use api::{AnkiApi, Note, NoteOptions, NoteQuery};
pub use client::AnkiConnectClient;
pub use fields::{FIELD_NAMES, note_fields};
pub use sync::{SyncReport, Syncer};
pub use template::{CardTemplate, NoteKind, NoteType};

#[cfg(test)]
mod tests;
