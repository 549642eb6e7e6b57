use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};

/// Durable string key-value storage for user preferences.
pub trait PreferenceStore {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> GlyphfieldResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> GlyphfieldResult<()> {
        (**self).set(key, value)
    }
}

/// Process-lifetime store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> GlyphfieldResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`.
///
/// A missing or unreadable file opens as an empty store.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preference file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preference file");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> GlyphfieldResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        let json = serde_json::to_vec_pretty(&self.values)
            .map_err(|e| GlyphfieldError::serde(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                GlyphfieldError::storage(format!("create '{}': {e}", parent.display()))
            })?;
        }
        std::fs::write(&self.path, json).map_err(|e| {
            GlyphfieldError::storage(format!("write '{}': {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/storage.rs"]
mod tests;
