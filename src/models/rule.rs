use serde::{Deserialize, Serialize};

/// A user-authored discipline rule. Consumed as a checklist by the UI;
/// the analytics core reads only the per-trade `rules_followed` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingRule {
    pub id: String,
    pub user_id: String,
    pub description: String,
}
