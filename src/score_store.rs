//! Persisted high score.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::StoreError;

/// Key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "snakeHighscore";
/// Default save file, next to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "snake_save.json";

/// A place that remembers one integer between sessions.
pub trait ScoreStore {
    /// Stored value, or 0 when nothing usable is stored.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Keeps the score for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        Ok(())
    }
}

/// JSON object file acting as a small key-value store. Keys other than
/// [`HIGH_SCORE_KEY`] are left untouched on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_PATH)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable save file, high score starts at 0");
                return 0;
            }
        };
        match entries.get(HIGH_SCORE_KEY) {
            None => 0,
            Some(value) => parse_score(value).unwrap_or_else(|| {
                warn!(%value, "stored high score is not a number, using 0");
                0
            }),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        // Only a file that parses to garbage is replaced. An unreadable one
        // is left alone and the error goes back to the caller.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Json(err)) => {
                warn!(path = %self.path.display(), %err, "save file is not valid JSON, replacing it");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(HIGH_SCORE_KEY.to_owned(), Value::from(score));
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Accept numbers and numeric strings, the way a browser key-value store
/// hands values back.
fn parse_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Best score seen so far. Only ever goes up.
pub struct HighScore<S: ScoreStore> {
    best: u32,
    store: S,
}

impl<S: ScoreStore> HighScore<S> {
    /// Reads the stored value once.
    pub fn new(store: S) -> Self {
        let best = store.load();
        info!(best, "high score loaded");
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a score. Returns `true` when it beat the previous best.
    ///
    /// A failed write is logged; the in-memory best still advances.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.store.save(score) {
            Ok(()) => info!(best = score, "new high score saved"),
            Err(err) => warn!(%err, best = score, "failed to save high score"),
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("save.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("save.json"));
        store.save(17).unwrap();
        assert_eq!(store.load(), 17);
        assert_eq!(JsonFileStore::new(dir.path().join("save.json")).load(), 17);
    }

    #[test]
    fn unparseable_values_read_as_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");

        fs::write(&path, r#"{"snakeHighscore":"lots"}"#).unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);

        fs::write(&path, "not json at all").unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, r#"{"snakeHighscore":"12"}"#).unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 12);
    }

    #[test]
    fn other_keys_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, r#"{"volume":0.5,"snakeHighscore":3}"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.save(9).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(entries["volume"], Value::from(0.5));
        assert_eq!(entries[HIGH_SCORE_KEY], Value::from(9));
    }

    #[test]
    fn corrupt_file_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = JsonFileStore::new(&path);
        store.save(4).unwrap();
        assert_eq!(store.load(), 4);
    }

    #[test]
    fn unreadable_file_fails_the_save_and_is_left_alone() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text.
        let path = dir.path().join("save.json");
        fs::create_dir(&path).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.save(6), Err(StoreError::Io(_))));
        assert!(path.is_dir());

        let mut high = HighScore::new(store);
        assert!(high.record(6));
        assert_eq!(high.best(), 6);
        assert!(path.is_dir());
    }

    #[test]
    fn high_score_only_increases() {
        let mut high = HighScore::new(MemoryStore::with_value(5));
        assert_eq!(high.best(), 5);
        assert!(!high.record(3));
        assert!(!high.record(5));
        assert_eq!(high.store().load(), 5);
        assert!(high.record(8));
        assert_eq!(high.best(), 8);
        assert_eq!(high.store().load(), 8);
    }
}
