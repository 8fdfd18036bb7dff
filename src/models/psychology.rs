use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed emotion vocabulary. Entries are validated against this list at
/// save time; the analytics core assumes tags are well-formed.
pub const EMOTIONS: &[&str] = &[
    "fear",
    "confidence",
    "anxiety",
    "discipline",
    "overtrading",
    "calm",
    "frustration",
    "greed",
    "fomo",
];

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

/// One emotional-state log tied to a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychologyEntry {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub emotions: Vec<String>,
    /// Bounded 1-10.
    pub intensity: u8,
    pub notes: String,
    /// Creation time, Unix milliseconds.
    pub timestamp: i64,
}

impl PsychologyEntry {
    pub fn has_emotion(&self, tag: &str) -> bool {
        self.emotions.iter().any(|e| e == tag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychologyInput {
    pub date: NaiveDate,
    pub emotions: Vec<String>,
    pub intensity: u8,
    pub notes: String,
}
