use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

/// One executed position record. `profit_loss` is the realized signed
/// currency amount; a value of exactly 0 counts as a non-win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub asset: String,
    pub side: Side,
    pub lot_size: f64,
    pub profit_loss: f64,
    pub notes: String,
    #[serde(default)]
    pub setup: Option<String>,
    pub rules_followed: bool,
    #[serde(default)]
    pub r_multiple: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub session: Option<String>,
    /// Automatic risk annotations, e.g. "Risk escalation".
    #[serde(default)]
    pub auto_flags: Vec<String>,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.profit_loss > 0.0
    }
}

/// Fields supplied by the user when logging or editing a trade. Identity
/// and ownership are filled in by the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeInput {
    pub date: NaiveDate,
    pub asset: String,
    pub side: Side,
    pub lot_size: f64,
    pub profit_loss: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub setup: Option<String>,
    pub rules_followed: bool,
    #[serde(default)]
    pub r_multiple: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub auto_flags: Vec<String>,
}
