use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{PsychologyEntry, Trade};

/// Length of the longest run of consecutive items satisfying `pred`.
/// The single scan shared by every streak-style metric, so reset and
/// tie-break semantics cannot drift between them.
pub fn longest_run<T, F>(items: &[T], pred: F) -> u32
where
    F: Fn(&T) -> bool,
{
    let mut current = 0u32;
    let mut best = 0u32;
    for item in items {
        if pred(item) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Longest run of rule-compliant trades, in date order.
pub fn longest_compliant_run(trades: &[Trade]) -> u32 {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.date);
    longest_run(&sorted, |t| t.rules_followed)
}

/// Longest run of profitable calendar days (net daily P&L > 0), in date order.
pub fn longest_profitable_day_run(trades: &[Trade]) -> u32 {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trade in trades {
        *daily.entry(trade.date).or_insert(0.0) += trade.profit_loss;
    }
    let totals: Vec<f64> = daily.into_values().collect();
    longest_run(&totals, |pnl| *pnl > 0.0)
}

/// Longest run of logged days whose entries include the given emotion,
/// scanning one slot per distinct calendar day in date order.
pub fn longest_emotion_day_run(entries: &[PsychologyEntry], emotion: &str) -> u32 {
    let mut daily: BTreeMap<NaiveDate, bool> = BTreeMap::new();
    for entry in entries {
        let slot = daily.entry(entry.date).or_insert(false);
        *slot = *slot || entry.has_emotion(emotion);
    }
    let days: Vec<bool> = daily.into_values().collect();
    longest_run(&days, |matched| *matched)
}
