//! Milestone evaluation. Achievements are never persisted: the whole view
//! is recomputed fresh from the source history, so unlocked state cannot
//! drift out of sync with the records that justify it.

pub mod catalog;
pub mod rank;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analytics::streaks;
use crate::models::{PsychologyEntry, Trade, User};

pub use catalog::{AchievementCategory, Metric, MilestoneSeries, DEFAULT_CATALOG};
pub use rank::{RankInfo, RankTier, Trend};

/// One milestone's computed view state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub category: AchievementCategory,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
    /// Current metric value, clamped to the target for display.
    pub progress: f64,
    pub max_progress: f64,
    pub xp_reward: u32,
    pub icon: String,
}

/// All milestone source metrics, computed once per evaluation.
#[derive(Debug, Clone, Default)]
pub struct MetricSnapshot {
    pub account_growth_pct: f64,
    pub win_count: u32,
    pub total_profit: f64,
    pub rule_follow_count: u32,
    pub compliance_pct: f64,
    pub compliance_run: u32,
    pub psych_log_count: u32,
    pub calm_session_count: u32,
    pub calm_day_run: u32,
    pub fomo_session_count: u32,
    pub profitable_day_run: u32,
    pub logging_streak: u32,
    pub active_days: u32,
    pub stop_loss_count: u32,
    pub best_r_multiple: f64,
}

impl MetricSnapshot {
    pub fn collect(trades: &[Trade], psych: &[PsychologyEntry], user: &User) -> Self {
        let total_profit: f64 = trades.iter().map(|t| t.profit_loss).sum();
        let starting = if user.starting_balance > 0.0 {
            user.starting_balance
        } else {
            crate::models::DEFAULT_STARTING_BALANCE
        };
        let rule_follow_count = trades.iter().filter(|t| t.rules_followed).count() as u32;
        let compliance_pct = if trades.is_empty() {
            0.0
        } else {
            rule_follow_count as f64 / trades.len() as f64 * 100.0
        };
        let active_days: HashSet<_> = trades.iter().map(|t| t.date).collect();
        let best_r_multiple = trades
            .iter()
            .filter_map(|t| t.r_multiple)
            .fold(0.0_f64, f64::max);

        MetricSnapshot {
            account_growth_pct: total_profit / starting * 100.0,
            win_count: trades.iter().filter(|t| t.is_win()).count() as u32,
            total_profit,
            rule_follow_count,
            compliance_pct,
            compliance_run: streaks::longest_compliant_run(trades),
            psych_log_count: psych.len() as u32,
            calm_session_count: psych.iter().filter(|p| p.has_emotion("calm")).count() as u32,
            calm_day_run: streaks::longest_emotion_day_run(psych, "calm"),
            fomo_session_count: psych.iter().filter(|p| p.has_emotion("fomo")).count() as u32,
            profitable_day_run: streaks::longest_profitable_day_run(trades),
            logging_streak: user.streak_count,
            active_days: active_days.len() as u32,
            stop_loss_count: trades
                .iter()
                .filter(|t| t.stop_loss.unwrap_or(0.0) > 0.0)
                .count() as u32,
            best_r_multiple,
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::AccountGrowthPct => self.account_growth_pct,
            Metric::WinCount => self.win_count as f64,
            Metric::TotalProfit => self.total_profit,
            Metric::RuleFollowCount => self.rule_follow_count as f64,
            Metric::CompliancePct => self.compliance_pct,
            Metric::ComplianceRun => self.compliance_run as f64,
            Metric::PsychLogCount => self.psych_log_count as f64,
            Metric::CalmSessionCount => self.calm_session_count as f64,
            Metric::CalmDayRun => self.calm_day_run as f64,
            Metric::FomoSessionCount => self.fomo_session_count as f64,
            Metric::ProfitableDayRun => self.profitable_day_run as f64,
            Metric::LoggingStreak => self.logging_streak as f64,
            Metric::ActiveDays => self.active_days as f64,
            Metric::StopLossCount => self.stop_loss_count as f64,
            Metric::BestRMultiple => self.best_r_multiple,
        }
    }
}

/// Expands every series x threshold pair in the catalog against the current
/// metric snapshot. Monotone: a metric increase can only flip milestones
/// from locked to unlocked.
pub fn evaluate(
    series_catalog: &[MilestoneSeries],
    trades: &[Trade],
    psych: &[PsychologyEntry],
    user: &User,
) -> Vec<Achievement> {
    let snapshot = MetricSnapshot::collect(trades, psych, user);
    let mut achievements = Vec::new();

    for series in series_catalog {
        let value = snapshot.value(series.metric);
        for &threshold in series.thresholds {
            achievements.push(Achievement {
                id: format!("{}-{}", series.id, threshold),
                category: series.category,
                title: format!("{} {}", series.title, threshold),
                description: series.description.replace("{n}", &threshold.to_string()),
                unlocked: value >= threshold,
                progress: value.clamp(0.0, threshold),
                max_progress: threshold,
                xp_reward: (threshold * series.xp_multiplier) as u32,
                icon: series.icon.to_string(),
            });
        }
    }

    achievements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use chrono::NaiveDate;

    fn trade_on(day: u32, pl: f64, followed: bool) -> Trade {
        Trade {
            id: format!("t-{}-{}", day, pl),
            user_id: "u1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            asset: "XAUUSD".to_string(),
            side: Side::Buy,
            lot_size: 0.1,
            profit_loss: pl,
            notes: String::new(),
            setup: None,
            rules_followed: followed,
            r_multiple: None,
            stop_loss: None,
            session: None,
            auto_flags: Vec::new(),
        }
    }

    fn user() -> User {
        User::new(
            "u1".to_string(),
            "trader@example.com".to_string(),
            "Trader".to_string(),
        )
    }

    #[test]
    fn test_snapshot_counts() {
        let mut t1 = trade_on(1, 250.0, true);
        t1.stop_loss = Some(1900.0);
        t1.r_multiple = Some(2.5);
        let trades = vec![t1, trade_on(2, -100.0, false), trade_on(2, 50.0, true)];
        let snapshot = MetricSnapshot::collect(&trades, &[], &user());

        assert_eq!(snapshot.win_count, 2);
        assert_eq!(snapshot.total_profit, 200.0);
        assert_eq!(snapshot.rule_follow_count, 2);
        assert_eq!(snapshot.active_days, 2);
        assert_eq!(snapshot.stop_loss_count, 1);
        assert_eq!(snapshot.best_r_multiple, 2.5);
        assert!((snapshot.account_growth_pct - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unlock_at_threshold() {
        let series = &[MilestoneSeries {
            id: "totalwin",
            category: AchievementCategory::Performance,
            title: "Winning Hand",
            description: "Achieve {n} profitable trades.",
            metric: Metric::WinCount,
            thresholds: &[1.0, 5.0],
            xp_multiplier: 15.0,
            icon: "💰",
        }];
        let trades = vec![trade_on(1, 100.0, true)];
        let achievements = evaluate(series, &trades, &[], &user());

        assert_eq!(achievements.len(), 2);
        assert!(achievements[0].unlocked);
        assert!(!achievements[1].unlocked);
        assert_eq!(achievements[0].xp_reward, 15);
        assert_eq!(achievements[1].max_progress, 5.0);
        // Progress clamps to the target.
        assert_eq!(achievements[0].progress, 1.0);
        assert_eq!(achievements[1].progress, 1.0);
    }

    #[test]
    fn test_progress_never_displays_negative() {
        // A drawn-down account has negative growth and negative total
        // profit; the display progress floors at 0.
        let trades = vec![trade_on(1, -500.0, true)];
        let achievements = evaluate(DEFAULT_CATALOG, &trades, &[], &user());
        for a in achievements
            .iter()
            .filter(|a| a.id.starts_with("grow") || a.id.starts_with("profit_val"))
        {
            assert!(a.progress >= 0.0, "{} shows negative progress", a.id);
            assert!(!a.unlocked);
        }
    }

    #[test]
    fn test_unlocks_are_monotone_in_the_metric() {
        let mut trades = vec![trade_on(1, 100.0, true)];
        let before = evaluate(DEFAULT_CATALOG, &trades, &[], &user());

        trades.push(trade_on(2, 500.0, true));
        trades.push(trade_on(3, 80.0, true));
        let after = evaluate(DEFAULT_CATALOG, &trades, &[], &user());

        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.id, a.id);
            if b.unlocked {
                assert!(a.unlocked, "{} regressed to locked", a.id);
            }
        }
    }

    #[test]
    fn test_catalog_thresholds_ascend() {
        for series in DEFAULT_CATALOG {
            for pair in series.thresholds.windows(2) {
                assert!(pair[0] < pair[1], "series {} not ascending", series.id);
            }
        }
    }

    #[test]
    fn test_empty_history_unlocks_nothing_outcome_based() {
        let achievements = evaluate(DEFAULT_CATALOG, &[], &[], &user());
        assert!(achievements
            .iter()
            .filter(|a| a.id.starts_with("totalwin") || a.id.starts_with("grow"))
            .all(|a| !a.unlocked));
    }
}
