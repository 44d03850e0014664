use std::fmt::Display;
use std::path::{Path, PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page, image or AnkiConnect request did not complete
    #[error("Network error ({target}): {message}")]
    Network { target: String, message: String },

    /// Unexpected HTML structure or an invalid record
    #[error("Parse error ({context}): {reason}")]
    Parse { context: String, reason: String },

    /// The note already exists; reported, never fatal
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("File error at {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// AnkiConnect answered with an error string
    #[error("AnkiConnect error in {action}: {message}")]
    Remote { action: String, message: String },
}

impl Error {
    pub fn network(target: impl Into<String>, err: impl Display) -> Self {
        Error::Network {
            target: target.into(),
            message: err.to_string(),
        }
    }

    pub fn parse(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn file_io(path: &Path, source: std::io::Error) -> Self {
        Error::FileIo {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::Duplicate(_))
    }
}
