//! Client-side persisted state.
//!
//! Widgets never reach for ambient globals; each one is handed a
//! [`StateStore`] for the single value it owns.

use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::WidgetError;

/// Key of the cached calendar access token.
pub const ACCESS_TOKEN_KEY: &str = "google_access_token";
/// Key of the quick-link list.
pub const QUICK_LINKS_KEY: &str = "quick_links";

pub trait StateStore<T>: Send + Sync {
    /// `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<T>, WidgetError>;

    fn save(&self, value: &T) -> Result<(), WidgetError>;

    fn clear(&self) -> Result<(), WidgetError>;
}

impl<T, S> StateStore<T> for std::sync::Arc<S>
where
    S: StateStore<T> + ?Sized,
{
    fn load(&self) -> Result<Option<T>, WidgetError> {
        (**self).load()
    }

    fn save(&self, value: &T) -> Result<(), WidgetError> {
        (**self).save(value)
    }

    fn clear(&self) -> Result<(), WidgetError> {
        (**self).clear()
    }
}

/// Keeps the value in process memory.
#[derive(Debug)]
pub struct MemoryStore<T> {
    value: Mutex<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<T>> {
        self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> StateStore<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>, WidgetError> {
        Ok(self.slot().clone())
    }

    fn save(&self, value: &T) -> Result<(), WidgetError> {
        *self.slot() = Some(value.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), WidgetError> {
        *self.slot() = None;
        Ok(())
    }
}

/// JSON-encoded value in `<dir>/<key>.json`.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> StateStore<T> for JsonFileStore<T> {
    fn load(&self) -> Result<Option<T>, WidgetError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, value: &T) -> Result<(), WidgetError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(value)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), WidgetError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newtab_common::LinkItem;

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&"token".to_string()).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("token"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_json_file_store_uses_key_as_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<Vec<LinkItem>> = JsonFileStore::new(dir.path(), QUICK_LINKS_KEY);
        let links = vec![LinkItem::new("1", "Google", "https://google.com")];

        store.save(&links).unwrap();

        assert!(dir.path().join("quick_links.json").exists());
        assert_eq!(store.load().unwrap(), Some(links));
    }

    #[test]
    fn test_json_file_store_missing_file_is_none_and_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<String> = JsonFileStore::new(dir.path(), ACCESS_TOKEN_KEY);

        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("google_access_token.json"), b"{oops").unwrap();
        let store: JsonFileStore<String> = JsonFileStore::new(dir.path(), ACCESS_TOKEN_KEY);

        assert!(matches!(store.load(), Err(WidgetError::Json(_))));
    }
}
