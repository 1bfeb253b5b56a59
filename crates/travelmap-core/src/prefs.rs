// crates/travelmap-core/src/prefs.rs

//! UI preference storage.
//!
//! The site remembers a handful of strings between visits: the last search
//! query, the chosen map style and color scheme, per-day route colors. Those
//! live behind [`PreferenceStore`] and are passed in explicitly; nothing in
//! this crate keeps them in a global.

use crate::error::{Result, TravelError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ITINERARIES_LAST_QUERY: &str = "itineraries:lastQuery";
pub const GALLERIES_LAST_QUERY: &str = "galleries:lastQuery";
pub const GALLERY_EDGE_TO_EDGE: &str = "galleries:edgeToEdge";
pub const MAP_STYLE: &str = "map:style";
pub const COLOR_SCHEME: &str = "map:colorScheme";

/// String key-value store for UI preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Process-local store; the default for tests and the CLI.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object; every write rewrites the file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if it does not exist yet.
    ///
    /// A file that exists but is not a JSON string map is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(s) if s.trim().is_empty() => BTreeMap::new(),
            Ok(s) => serde_json::from_str(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(TravelError::Io(e)),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `values` to disk, then adopt them. On failure the store keeps
    /// what the file last held.
    fn commit(&mut self, values: BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        self.values = values;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut next = self.values.clone();
        next.remove(key);
        self.commit(next)
    }
}

/// Last search query saved under `key`, if any.
pub fn last_query(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    store.get(key).filter(|q| !q.is_empty())
}

/// Save the trimmed query under `key`.
///
/// Preferences are a convenience; a failing store is logged, not returned.
pub fn remember_query(store: &mut dyn PreferenceStore, key: &str, query: &str) {
    if let Err(e) = store.set(key, query.trim()) {
        warn!(key, error = %e, "could not persist search query");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut s = MemoryStore::new();
        assert!(s.is_empty());
        s.set(MAP_STYLE, "dark").unwrap();
        assert_eq!(s.get(MAP_STYLE).as_deref(), Some("dark"));
        s.remove(MAP_STYLE).unwrap();
        assert!(s.get(MAP_STYLE).is_none());
    }

    #[test]
    fn queries_are_trimmed() {
        let mut s = MemoryStore::new();
        remember_query(&mut s, ITINERARIES_LAST_QUERY, "  budapest ");
        assert_eq!(last_query(&s, ITINERARIES_LAST_QUERY).as_deref(), Some("budapest"));

        remember_query(&mut s, ITINERARIES_LAST_QUERY, "   ");
        assert!(last_query(&s, ITINERARIES_LAST_QUERY).is_none());
    }

    #[test]
    fn json_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("ui.json");

        let mut s = JsonFileStore::open(&path).unwrap();
        s.set(COLOR_SCHEME, "teal").unwrap();
        s.set(GALLERY_EDGE_TO_EDGE, "true").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(COLOR_SCHEME).as_deref(), Some("teal"));
        assert_eq!(reopened.get(GALLERY_EDGE_TO_EDGE).as_deref(), Some("true"));
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.json");

        let mut s = JsonFileStore::open(&path).unwrap();
        s.set(MAP_STYLE, "dark").unwrap();

        // A directory in place of the file makes every write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(s.set(MAP_STYLE, "satellite").is_err());
        assert!(s.set(COLOR_SCHEME, "red").is_err());
        assert!(s.remove(MAP_STYLE).is_err());
        assert_eq!(s.get(MAP_STYLE).as_deref(), Some("dark"));
        assert_eq!(s.get(COLOR_SCHEME), None);
    }

    #[test]
    fn json_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(TravelError::Json(_))));
    }
}
