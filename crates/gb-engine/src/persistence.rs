//! Save slots.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::session::Session;

/// Keyed storage for session snapshots.
pub trait SessionStore {
    /// Store a snapshot under `key`, replacing any previous one.
    fn save(&mut self, key: &str, session: &Session) -> EngineResult<()>;
    /// The snapshot under `key`, if there is one.
    fn load(&self, key: &str) -> EngineResult<Option<Session>>;
}

/// In-memory slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, Session>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn save(&mut self, key: &str, session: &Session) -> EngineResult<()> {
        self.slots.insert(key.to_string(), session.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> EngineResult<Option<Session>> {
        Ok(self.slots.get(key).cloned())
    }
}

/// One pretty-printed JSON file per slot, `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store saves in `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> EngineResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EngineError::InvalidSaveKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStore for JsonFileStore {
    fn save(&mut self, key: &str, session: &Session) -> EngineResult<()> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&path, json)?;
        log::info!("saved slot '{key}' to {}", path.display());
        Ok(())
    }

    fn load(&self, key: &str) -> EngineResult<Option<Session>> {
        let path = self.path(key)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }
}
