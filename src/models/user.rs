use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Capital baseline used when no starting balance has been configured.
pub const DEFAULT_STARTING_BALANCE: f64 = 10_000.0;

/// XP needed to advance one level.
pub const XP_PER_LEVEL: u32 = 1_000;

/// A journal user plus their progression state. `level` is always a pure
/// function of `xp` and is recomputed on every XP mutation; it is stored
/// only so serialized snapshots carry it for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default = "default_balance")]
    pub starting_balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub streak_count: u32,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
}

fn default_balance() -> f64 {
    DEFAULT_STARTING_BALANCE
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_level() -> u32 {
    1
}

impl User {
    pub fn new(id: String, email: String, name: String) -> Self {
        User {
            id,
            email,
            name,
            is_anonymous: false,
            starting_balance: DEFAULT_STARTING_BALANCE,
            currency: default_currency(),
            xp: 0,
            level: 1,
            streak_count: 0,
            last_activity_date: None,
        }
    }
}
