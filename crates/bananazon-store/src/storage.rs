//! # Storage Port
//!
//! The key/value persistence the cart store writes through. It plays the role
//! browser local storage plays for a web storefront: one string value per key,
//! read once at startup, overwritten on every change.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CartStorage (trait)                               │
//! │                 load(key) · save(key, value) · remove(key)              │
//! │                                                                         │
//! │        ┌─────────────────────┐          ┌──────────────────────────┐    │
//! │        │   MemoryStorage     │          │      FileStorage         │    │
//! │        │                     │          │                          │    │
//! │        │  HashMap behind a   │          │  <root>/<key>.json       │    │
//! │        │  shared Mutex; all  │          │  write tmp, then rename  │    │
//! │        │  clones see writes  │          │                          │    │
//! │        └─────────────────────┘          └──────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Key/value storage for persisted cart state.
///
/// Implementations must be safe to share between threads; the store holds
/// them behind an `Arc`.
pub trait CartStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Checks that `key` can be used as a storage key (and a file stem).
///
/// Allowed: ASCII letters, digits, `-`, `_` and `.`, not starting with `.`.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage.
///
/// Clones share the same map, so a second store opened over a clone sees
/// everything the first one wrote, which is how tests simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key under a root directory.
///
/// ## Platform Default Root
/// - **macOS**: `~/Library/Application Support/com.bananazon.cart/`
/// - **Windows**: `%APPDATA%\bananazon\cart\data\`
/// - **Linux**: `~/.local/share/cart/`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates file storage rooted at `root`. The directory is created on the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStorage { root: root.into() }
    }

    /// File storage in the platform data directory.
    pub fn in_data_dir() -> StoreResult<Self> {
        Ok(FileStorage::new(Self::default_root()?))
    }

    /// The platform data directory for Bananazon.
    pub fn default_root() -> StoreResult<PathBuf> {
        directories::ProjectDirs::from("com", "bananazon", "cart")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StoreError::NoStorageDir)
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Readers only ever see the old or the new value.
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(?path, bytes = value.len(), "Saved storage entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("bananazon-cart").is_ok());
        assert!(validate_key("cart_v2.backup").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("k").unwrap(), None);

        storage.save("k", "v1").unwrap();
        storage.save("k", "v2").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.save("k", "shared").unwrap();
        assert_eq!(b.load("k").unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.load("bananazon-cart").unwrap(), None);

        storage.save("bananazon-cart", r#"{"a":1}"#).unwrap();
        let path = storage.path_for("bananazon-cart").unwrap();
        assert!(path.ends_with("bananazon-cart.json"));
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        assert_eq!(
            storage.load("bananazon-cart").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );

        storage.remove("bananazon-cart").unwrap();
        storage.remove("bananazon-cart").unwrap();
        assert_eq!(storage.load("bananazon-cart").unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.save("../outside", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(storage.load("").is_err());
    }

    #[test]
    fn test_file_storage_surfaces_io_errors() {
        let dir = tempdir().expect("tempdir");
        // Root is a regular file, so the directory can't be created.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let storage = FileStorage::new(&blocker);
        assert!(matches!(storage.save("k", "v"), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_file_storage_failed_save_leaves_no_tmp() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());
        let path = storage.path_for("bananazon-cart").unwrap();

        // A directory in place of the target makes the rename fail.
        fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(matches!(
            storage.save("bananazon-cart", "{}"),
            Err(StoreError::Io(_))
        ));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }
}
