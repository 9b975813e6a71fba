//! Session persistence.
//!
//! The session is two entries in a key-value storage: the raw token under
//! `authToken` and the JSON encoded profile under `authUser`. Nothing here
//! validates the token; a stored token only means the user was logged in at
//! some point.

use crate::{StorageError, UserProfile};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const AUTH_USER_KEY: &str = "authUser";

/// Synchronous string key-value storage, modelled on the browser's
/// `localStorage`.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-local storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }
}

/// Storage persisted as a flat JSON object in a single file.
///
/// The file is read once when opened. Every mutation rewrites it through a
/// temporary file and a rename; a failed write is logged and the in-memory
/// value is kept.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage at `path`. A missing or empty file opens empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|error| StorageError::Corrupt(path.clone(), error))?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(StorageError::Io(path, error)),
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn items(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn persist(&self, items: &BTreeMap<String, String>) {
        if let Err(error) = self.write_file(items) {
            tracing::warn!(path = %self.path.display(), %error, "failed to persist storage");
        }
    }

    fn write_file(&self, items: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        let mut items = self.items();
        items.insert(key.to_string(), value.to_string());
        self.persist(&items);
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items();
        if items.remove(key).is_some() {
            self.persist(&items);
        }
    }
}

/// Reads and writes the session entries.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.get_token().is_some())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// A store over fresh [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn save_token(&self, token: &str) {
        self.storage.set_item(AUTH_TOKEN_KEY, token);
        tracing::debug!("auth token saved");
    }

    #[must_use]
    pub fn get_token(&self) -> Option<String> {
        self.storage.get_item(AUTH_TOKEN_KEY)
    }

    /// Store the profile as JSON, whatever shape it has.
    pub fn save_user<T: Serialize + ?Sized>(&self, user: &T) {
        match serde_json::to_string(user) {
            Ok(encoded) => self.storage.set_item(AUTH_USER_KEY, &encoded),
            Err(error) => tracing::warn!(%error, "failed to encode user profile"),
        }
    }

    /// The stored profile, or `None` when absent or unreadable.
    #[must_use]
    pub fn get_user(&self) -> Option<UserProfile> {
        let encoded = self.storage.get_item(AUTH_USER_KEY)?;
        serde_json::from_str(&encoded).ok()
    }

    pub fn clear_auth(&self) {
        self.storage.remove_item(AUTH_TOKEN_KEY);
        self.storage.remove_item(AUTH_USER_KEY);
        tracing::debug!("session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn session_store_round_trips_token_and_user() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get_token(), None);
        assert_eq!(store.get_user(), None);

        store.save_token("t1");
        store.save_user(&profile("A"));

        assert_eq!(store.get_token().as_deref(), Some("t1"));
        assert_eq!(store.get_user(), Some(profile("A")));
    }

    #[test]
    fn session_store_accepts_any_token_shape() {
        let store = SessionStore::in_memory();
        store.save_token("");
        assert_eq!(store.get_token().as_deref(), Some(""));
    }

    #[test]
    fn clear_auth_removes_both_entries() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.save_token("t1");
        store.save_user(&profile("A"));
        storage.set_item("theme", "dark");

        store.clear_auth();

        assert_eq!(storage.get_item(AUTH_TOKEN_KEY), None);
        assert_eq!(storage.get_item(AUTH_USER_KEY), None);
        assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn get_user_ignores_unparseable_value() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(AUTH_USER_KEY, "{not json");
        let store = SessionStore::new(storage);
        assert_eq!(store.get_user(), None);
    }

    #[test]
    fn user_is_stored_as_json_object() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.save_user(&profile("A"));
        let raw = storage.get_item(AUTH_USER_KEY).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            json!({ "name": "A" })
        );
    }

    #[test]
    fn user_of_any_shape_is_stored_but_not_read_as_profile() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.save_user(&json!("A"));
        assert_eq!(storage.get_item(AUTH_USER_KEY).as_deref(), Some("\"A\""));
        assert_eq!(store.get_user(), None);
    }

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item(AUTH_TOKEN_KEY), None);
        storage.set_item(AUTH_TOKEN_KEY, "t1");
        storage.set_item("other", "x");
        storage.remove_item("other");
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item(AUTH_TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(reopened.get_item("other"), None);
    }

    #[test]
    fn file_storage_opens_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "  \n").unwrap();
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::Corrupt(_, _))
        ));
    }
}
