use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category a verb pair is filed under on the source site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Other,
}

impl Level {
    /// Every level, in output order
    pub const ALL: [Level; 4] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Advanced,
        Level::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Other => "other",
        }
    }

    /// File name of this level's JSON array inside the data directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown level '{}' (expected beginner, intermediate, advanced or other)",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            "other" => Ok(Level::Other),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A verb as written on the page plus its kana reading, if stated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub text: String,
    #[serde(default)]
    pub reading: Option<String>,
}

impl Verb {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reading: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub sentence: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// Example sentences for each verb form, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentences {
    #[serde(default)]
    pub intransitive: Vec<Example>,
    #[serde(default)]
    pub transitive: Vec<Example>,
}

/// One scraped intransitive/transitive pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPair {
    pub id: String,
    pub title: String,
    pub level: Level,
    pub intransitive_verb: Verb,
    pub transitive_verb: Verb,
    #[serde(default)]
    pub example_sentences: ExampleSentences,
    #[serde(default)]
    pub practice_questions: Vec<String>,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Relative to the output root, e.g. `images/開く_開ける.jpg`
    #[serde(default)]
    pub image_path: Option<String>,
    pub source_url: String,
    pub attribution: String,
}

impl VerbPair {
    /// Both halves of the pair must carry text
    pub fn validate(&self) -> Result<(), String> {
        if self.intransitive_verb.text.trim().is_empty() {
            return Err(format!("pair '{}' has an empty intransitive verb", self.id));
        }
        if self.transitive_verb.text.trim().is_empty() {
            return Err(format!("pair '{}' has an empty transitive verb", self.id));
        }
        if self.id.trim().is_empty() {
            return Err(format!("pair from {} has an empty id", self.source_url));
        }
        Ok(())
    }

    /// Image file name without the `images/` prefix
    pub fn image_file_name(&self) -> Option<&str> {
        self.image_path
            .as_deref()
            .map(|path| path.rsplit('/').next().unwrap_or(path))
    }
}
