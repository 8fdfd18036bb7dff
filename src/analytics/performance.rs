use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Trade;

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Aggregate performance metrics over a trade history. All ratios degrade
/// to defined defaults on empty input instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_trades: usize,
    pub win_count: usize,
    /// Trades with profit/loss <= 0.
    pub loss_count: usize,
    /// Percentage, 0 when there are no trades.
    pub win_rate: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    /// gross_profit / gross_loss, with a zero gross loss treated as 1.
    /// Saturating by convention, not a true ratio when there are no losses.
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// Expected profit per trade given historical win rate and sizes.
    pub expectancy: f64,
    /// Mean R-multiple; trades without one contribute 0.
    pub avg_r_multiple: f64,
    /// Percentage, 100 when there are no trades.
    pub rule_compliance_pct: f64,
    /// Net P&L keyed by uppercased asset symbol.
    pub pnl_by_asset: BTreeMap<String, f64>,
    /// Net P&L keyed by setup label, "Unknown" when unset.
    pub pnl_by_setup: BTreeMap<String, f64>,
    /// Net P&L keyed by weekday name; every weekday is present.
    pub pnl_by_weekday: BTreeMap<String, f64>,
    /// Average P&L of rule-followed vs rule-broken trades.
    pub avg_pnl_followed: f64,
    pub avg_pnl_broken: f64,
}

fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_sunday() as usize]
}

pub fn compute(trades: &[Trade]) -> PerformanceReport {
    let total = trades.len();

    let wins: Vec<&Trade> = trades.iter().filter(|t| t.profit_loss > 0.0).collect();
    let losses: Vec<&Trade> = trades.iter().filter(|t| t.profit_loss <= 0.0).collect();

    let gross_profit: f64 = wins.iter().map(|t| t.profit_loss).sum();
    let gross_loss: f64 = losses.iter().map(|t| t.profit_loss).sum::<f64>().abs();

    let avg_win = if wins.is_empty() {
        0.0
    } else {
        gross_profit / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        gross_loss / losses.len() as f64
    };

    // Zero gross loss saturates to a divisor of 1 rather than infinity.
    let profit_factor = gross_profit / if gross_loss > 0.0 { gross_loss } else { 1.0 };

    let win_fraction = if total > 0 {
        wins.len() as f64 / total as f64
    } else {
        0.0
    };
    let expectancy = win_fraction * avg_win - (1.0 - win_fraction) * avg_loss;

    let avg_r_multiple = if total > 0 {
        trades.iter().map(|t| t.r_multiple.unwrap_or(0.0)).sum::<f64>() / total as f64
    } else {
        0.0
    };

    let followed: Vec<&Trade> = trades.iter().filter(|t| t.rules_followed).collect();
    let broken: Vec<&Trade> = trades.iter().filter(|t| !t.rules_followed).collect();
    let rule_compliance_pct = if total > 0 {
        followed.len() as f64 / total as f64 * 100.0
    } else {
        100.0
    };
    let avg_pnl_followed = if followed.is_empty() {
        0.0
    } else {
        followed.iter().map(|t| t.profit_loss).sum::<f64>() / followed.len() as f64
    };
    let avg_pnl_broken = if broken.is_empty() {
        0.0
    } else {
        broken.iter().map(|t| t.profit_loss).sum::<f64>() / broken.len() as f64
    };

    let mut pnl_by_asset: BTreeMap<String, f64> = BTreeMap::new();
    let mut pnl_by_setup: BTreeMap<String, f64> = BTreeMap::new();
    let mut pnl_by_weekday: BTreeMap<String, f64> = WEEKDAYS
        .iter()
        .map(|d| (d.to_string(), 0.0))
        .collect();

    for trade in trades {
        // Uppercase so case variations in user input land in one bucket.
        *pnl_by_asset
            .entry(trade.asset.to_uppercase())
            .or_insert(0.0) += trade.profit_loss;
        let setup = trade
            .setup
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        *pnl_by_setup.entry(setup).or_insert(0.0) += trade.profit_loss;
        *pnl_by_weekday
            .entry(weekday_name(trade.date.weekday()).to_string())
            .or_insert(0.0) += trade.profit_loss;
    }

    PerformanceReport {
        total_trades: total,
        win_count: wins.len(),
        loss_count: losses.len(),
        win_rate: win_fraction * 100.0,
        gross_profit,
        gross_loss,
        profit_factor,
        avg_win,
        avg_loss,
        expectancy,
        avg_r_multiple,
        rule_compliance_pct,
        pnl_by_asset,
        pnl_by_setup,
        pnl_by_weekday,
        avg_pnl_followed,
        avg_pnl_broken,
    }
}
