use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// Auto-flag marking a position-size escalation after a loss.
pub const RISK_ESCALATION_FLAG: &str = "Risk escalation";

const VIOLATION_PENALTY: i32 = 15;
const ESCALATION_PENALTY: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl RankTier {
    /// Ascending tier floors; the highest floor met or exceeded wins.
    const LADDER: [(RankTier, u32); 5] = [
        (RankTier::Bronze, 0),
        (RankTier::Silver, 21),
        (RankTier::Gold, 41),
        (RankTier::Platinum, 61),
        (RankTier::Diamond, 81),
    ];

    pub fn for_score(score: u32) -> RankTier {
        Self::LADDER
            .iter()
            .rev()
            .find(|(_, floor)| score >= *floor)
            .map(|(tier, _)| *tier)
            .unwrap_or(RankTier::Bronze)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankInfo {
    /// Trailing 7-day discipline score, 0-100.
    pub score: u32,
    pub trend: Trend,
    pub tier: RankTier,
}

/// Discipline score for one window: starts at 100, loses a fixed penalty
/// per rule violation and per flagged risk escalation, clamped to 0-100.
/// An empty window scores a clean 100.
fn window_score(window: &[&Trade]) -> u32 {
    if window.is_empty() {
        return 100;
    }
    let violations = window.iter().filter(|t| !t.rules_followed).count() as i32;
    let escalations = window
        .iter()
        .filter(|t| t.auto_flags.iter().any(|f| f == RISK_ESCALATION_FLAG))
        .count() as i32;
    let score = 100 - violations * VIOLATION_PENALTY - escalations * ESCALATION_PENALTY;
    score.clamp(0, 100) as u32
}

/// Scores the trailing 7 days and the 7 days before those; equal scores
/// count as improving.
pub fn evaluate(trades: &[Trade], today: NaiveDate) -> RankInfo {
    let week_ago = today - Duration::days(7);
    let two_weeks_ago = today - Duration::days(14);

    // Each window covers exactly 7 calendar days; a trade dated exactly
    // 7 days ago belongs to the previous window, not the current one.
    let recent: Vec<&Trade> = trades.iter().filter(|t| t.date > week_ago).collect();
    let previous: Vec<&Trade> = trades
        .iter()
        .filter(|t| t.date > two_weeks_ago && t.date <= week_ago)
        .collect();

    let score = window_score(&recent);
    let past_score = window_score(&previous);
    let trend = if score >= past_score {
        Trend::Improving
    } else {
        Trend::Declining
    };

    RankInfo {
        score,
        trend,
        tier: RankTier::for_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;

    fn trade_on(date: NaiveDate, followed: bool, flags: &[&str]) -> Trade {
        Trade {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            date,
            asset: "USDJPY".to_string(),
            side: Side::Sell,
            lot_size: 0.3,
            profit_loss: 10.0,
            notes: String::new(),
            setup: None,
            rules_followed: followed,
            r_multiple: None,
            stop_loss: None,
            session: None,
            auto_flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn test_no_trades_scores_clean() {
        let info = evaluate(&[], today());
        assert_eq!(info.score, 100);
        assert_eq!(info.tier, RankTier::Diamond);
        assert_eq!(info.trend, Trend::Improving);
    }

    #[test]
    fn test_penalties_subtract_from_hundred() {
        let d = today() - Duration::days(2);
        let trades = vec![
            trade_on(d, false, &[]),
            trade_on(d, true, &[RISK_ESCALATION_FLAG]),
            trade_on(d, true, &[]),
        ];
        let info = evaluate(&trades, today());
        assert_eq!(info.score, 75);
        assert_eq!(info.tier, RankTier::Platinum);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let d = today() - Duration::days(1);
        let trades: Vec<Trade> = (0..10).map(|_| trade_on(d, false, &[])).collect();
        let info = evaluate(&trades, today());
        assert_eq!(info.score, 0);
        assert_eq!(info.tier, RankTier::Bronze);
    }

    #[test]
    fn test_equal_scores_are_not_a_decline() {
        let recent = today() - Duration::days(3);
        let past = today() - Duration::days(10);
        let trades = vec![trade_on(recent, false, &[]), trade_on(past, false, &[])];
        let info = evaluate(&trades, today());
        assert_eq!(info.trend, Trend::Improving);
    }

    #[test]
    fn test_window_boundary_at_seven_days() {
        // A violation dated exactly 7 days ago falls in the previous
        // window; the current week stays clean.
        let trades = vec![trade_on(today() - Duration::days(7), false, &[])];
        let info = evaluate(&trades, today());
        assert_eq!(info.score, 100);
        assert_eq!(info.trend, Trend::Improving);

        // One day later in history it counts against the current week.
        let trades = vec![trade_on(today() - Duration::days(6), false, &[])];
        let info = evaluate(&trades, today());
        assert_eq!(info.score, 85);
    }

    #[test]
    fn test_worse_week_is_declining() {
        let recent = today() - Duration::days(3);
        let past = today() - Duration::days(10);
        let trades = vec![
            trade_on(recent, false, &[]),
            trade_on(recent, false, &[]),
            trade_on(past, false, &[]),
        ];
        let info = evaluate(&trades, today());
        assert_eq!(info.score, 70);
        assert_eq!(info.trend, Trend::Declining);
    }

    #[test]
    fn test_tier_floors() {
        assert_eq!(RankTier::for_score(0), RankTier::Bronze);
        assert_eq!(RankTier::for_score(20), RankTier::Bronze);
        assert_eq!(RankTier::for_score(21), RankTier::Silver);
        assert_eq!(RankTier::for_score(41), RankTier::Gold);
        assert_eq!(RankTier::for_score(61), RankTier::Platinum);
        assert_eq!(RankTier::for_score(80), RankTier::Platinum);
        assert_eq!(RankTier::for_score(81), RankTier::Diamond);
        assert_eq!(RankTier::for_score(100), RankTier::Diamond);
        assert_eq!(RankTier::for_score(100).name(), "Diamond");
    }
}
