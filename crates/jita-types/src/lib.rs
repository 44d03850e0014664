pub mod types;

pub use types::{Example, ExampleSentences, Level, ParseLevelError, Verb, VerbPair};
