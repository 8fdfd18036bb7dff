use std::collections::HashMap;
use std::sync::Mutex;

use crate::db::Storage;
use crate::error::{JournalError, Result};

/// Ephemeral in-memory store over the same key space as [`SqliteStore`].
/// Used for anonymous/guest sessions; everything is lost on drop.
///
/// [`SqliteStore`]: crate::db::SqliteStore
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn read_key(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| JournalError::Database(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| JournalError::Database(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
