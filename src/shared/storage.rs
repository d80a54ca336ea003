use async_trait::async_trait;
#[cfg(test)]
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised by a key/value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("storage I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// String key/value slots on the device
#[async_trait]
pub trait KeyValueStorage: Send + Sync + 'static {
    /// Read a slot, `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot with `value`
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// File-backed storage: one `<key>.json` file per slot inside `root`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.slot_path(key);

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })?;

        // Write beside the slot, then rename over it
        let path = self.slot_path(key);
        let tmp_path = self.root.join(format!("{key}.json.tmp"));

        tokio::fs::write(&tmp_path, value)
            .await
            .map_err(|source| StorageError::Io {
                path: tmp_path.clone(),
                source,
            })?;

        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }
}

/// In-process storage, nothing survives the process
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one slot
    pub fn with_slot(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.insert(key, value);
        storage
    }

    fn insert(&self, key: &str, value: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
    }

    /// Synchronous read, for inspection
    pub fn peek(&self, key: &str) -> Option<String> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(key).cloned()
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("todos").is_ok());
        assert!(validate_key("todo-list_2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("todos").await.unwrap(), None);

        storage.set("todos", "[]").await.unwrap();
        assert_eq!(storage.get("todos").await.unwrap().as_deref(), Some("[]"));

        storage.set("todos", "[1]").await.unwrap();
        assert_eq!(storage.peek("todos").as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_file_storage_missing_slot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("todos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set("todos", "first").await.unwrap();
        storage.set("todos", "second").await.unwrap();

        assert_eq!(
            storage.get("todos").await.unwrap().as_deref(),
            Some("second")
        );
        assert!(dir.path().join("nested").join("todos.json").exists());
        assert!(!dir.path().join("nested").join("todos.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_storage_rejects_bad_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set("../escape", "x").await,
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_file_storage_unwritable_root() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let storage = FileStorage::new(&blocker);
        assert!(matches!(
            storage.set("todos", "[]").await,
            Err(StorageError::Io { .. })
        ));
    }
}
