//! JSON-file key/value store for the terminal client.
//!
//! Holds the same keys the browser keeps in `localStorage`, so a chat
//! transcript survives between runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chat_session_lib::{KeyValueStore, StorageError};
use tracing::warn;

pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = directories::ProjectDirs::from("com", "medichat", "medichat")
            .context("Failed to determine data directory")?
            .data_dir()
            .to_path_buf();

        Ok(data_dir.join("store.json"))
    }

    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read store file {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring malformed store file {}: {}", path.display(), e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole map to a temp file, then rename it into place
    fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_session_lib::{Message, Transcript};
    use shared::protocol::{CHAT_HISTORY_KEY, THEME_KEY};

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert!(store.get(THEME_KEY).is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(THEME_KEY, "light").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.remove(THEME_KEY).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get(THEME_KEY).is_none());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get(CHAT_HISTORY_KEY).is_none());
    }

    #[test]
    fn test_transcript_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        let mut transcript = Transcript::load(&store);
        transcript
            .append(Message::user("I have fever"), &mut store)
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        let restored = Transcript::load(&reopened);
        assert_eq!(restored.messages()[0].text(), "I have fever");
    }
}
