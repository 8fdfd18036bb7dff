use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coach::{CoachConfig, GeminiClient};
use crate::db::{SqliteStore, Storage};
use crate::error::Result;

/// Application configuration, deserializable from a JSON settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// AI coach backend; the coach feature is unavailable when unset.
    #[serde(default)]
    pub coach: Option<CoachConfig>,
}

impl JournalConfig {
    pub fn open_store(&self) -> Result<Arc<dyn Storage>> {
        Ok(Arc::new(SqliteStore::open(&self.db_path)?))
    }

    pub fn coach_client(&self) -> Option<GeminiClient> {
        self.coach.clone().map(GeminiClient::new)
    }
}
