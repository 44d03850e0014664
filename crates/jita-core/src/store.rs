use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use jita_config::paths::PathsConfig;
use jita_types::{Level, VerbPair};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// JSON files under `<root>/data`
#[derive(Debug, Clone)]
pub struct DataStore {
    paths: PathsConfig,
}

impl DataStore {
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Create `data/`, `data/pairs/` and `images/` if missing
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.paths.data_dir(),
            self.paths.pairs_dir(),
            self.paths.images_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|e| Error::file_io(&dir, e))?;
        }
        Ok(())
    }

    pub fn level_file(&self, level: Level) -> PathBuf {
        self.paths.data_dir().join(level.file_name())
    }

    pub fn pair_file(&self, id: &str) -> PathBuf {
        self.paths.pairs_dir().join(format!("{id}.json"))
    }

    pub fn write_pair(&self, pair: &VerbPair) -> Result<PathBuf> {
        let path = self.pair_file(&pair.id);
        write_json(&path, pair)?;
        Ok(path)
    }

    pub fn write_level(&self, level: Level, pairs: &[VerbPair]) -> Result<PathBuf> {
        let path = self.level_file(level);
        write_json(&path, pairs)?;
        tracing::info!("Wrote {} pairs to {}", pairs.len(), path.display());
        Ok(path)
    }

    /// `None` when the level has never been scraped
    pub fn read_level(&self, level: Level) -> Result<Option<Vec<VerbPair>>> {
        let path = self.level_file(level);
        match fs::read_to_string(&path) {
            Ok(json) => parse_json(&path, &json).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::file_io(&path, e)),
        }
    }

    /// Rewrite `all.json` from the level files on disk, in level order
    pub fn rebuild_all(&self) -> Result<usize> {
        let mut all = Vec::new();
        for level in Level::ALL {
            if let Some(pairs) = self.read_level(level)? {
                all.extend(pairs);
            }
        }

        let path = self.paths.all_file();
        write_json(&path, &all)?;
        tracing::info!("Wrote {} pairs to {}", all.len(), path.display());
        Ok(all.len())
    }

    /// Read `all.json`, or one level's file when filtered.
    /// Records that fail validation are logged and dropped.
    pub fn load(&self, level: Option<Level>) -> Result<Vec<VerbPair>> {
        let path = match level {
            Some(level) => self.level_file(level),
            None => self.paths.all_file(),
        };

        let json = fs::read_to_string(&path).map_err(|e| Error::file_io(&path, e))?;
        let pairs: Vec<VerbPair> = parse_json(&path, &json)?;

        Ok(pairs
            .into_iter()
            .filter(|pair| match pair.validate() {
                Ok(()) => true,
                Err(reason) => {
                    tracing::warn!("Skipping invalid record in {}: {}", path.display(), reason);
                    false
                }
            })
            .collect())
    }
}

/// Pretty JSON with literal non-ASCII text and a trailing newline
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;
    json.push('\n');
    fs::write(path, json).map_err(|e| Error::file_io(path, e))
}

fn parse_json<T: DeserializeOwned>(path: &Path, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::parse(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jita_types::{ExampleSentences, Verb};

    fn temp_store() -> DataStore {
        let root = std::env::temp_dir().join(format!("jita-store-{}", uuid::Uuid::new_v4()));
        let store = DataStore::new(PathsConfig::at(root));
        store.ensure_dirs().unwrap();
        store
    }

    fn pair(level: Level, a: &str, b: &str) -> VerbPair {
        VerbPair {
            id: format!("{a}_{b}"),
            title: format!("{a}・{b}"),
            level,
            intransitive_verb: Verb::new(a),
            transitive_verb: Verb::new(b),
            example_sentences: ExampleSentences::default(),
            practice_questions: vec![],
            answers: vec![],
            image_url: None,
            image_path: None,
            source_url: format!("https://example.test/{a}.html"),
            attribution: "test".to_string(),
        }
    }

    #[test]
    fn all_json_follows_level_order() {
        let store = temp_store();
        store
            .write_level(Level::Advanced, &[pair(Level::Advanced, "治る", "治す")])
            .unwrap();
        store
            .write_level(
                Level::Beginner,
                &[
                    pair(Level::Beginner, "開く", "開ける"),
                    pair(Level::Beginner, "閉まる", "閉める"),
                ],
            )
            .unwrap();

        assert_eq!(store.rebuild_all().unwrap(), 3);

        let all = store.load(None).unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["開く_開ける", "閉まる_閉める", "治る_治す"]);
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let store = temp_store();
        store
            .write_level(Level::Beginner, &[pair(Level::Beginner, "開く", "開ける")])
            .unwrap();

        store.rebuild_all().unwrap();
        let first = fs::read(store.paths().all_file()).unwrap();
        store.rebuild_all().unwrap();
        let second = fs::read(store.paths().all_file()).unwrap();

        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        assert!(text.contains("開く"), "non-ASCII must stay literal");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn load_drops_invalid_records() {
        let store = temp_store();
        let mut broken = pair(Level::Beginner, "上がる", "上げる");
        broken.intransitive_verb.text.clear();
        store
            .write_level(
                Level::Beginner,
                &[broken, pair(Level::Beginner, "開く", "開ける")],
            )
            .unwrap();

        let pairs = store.load(Some(Level::Beginner)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].id, "開く_開ける");
    }

    #[test]
    fn missing_files() {
        let store = temp_store();
        assert!(store.read_level(Level::Other).unwrap().is_none());
        assert!(matches!(
            store.load(Some(Level::Other)),
            Err(Error::FileIo { .. })
        ));
    }

    #[test]
    fn pair_file_is_keyed_by_id() {
        let store = temp_store();
        let path = store.write_pair(&pair(Level::Beginner, "開く", "開ける")).unwrap();
        assert!(path.ends_with("pairs/開く_開ける.json"));
        assert!(path.exists());
    }
}
