use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementCategory {
    Discipline,
    Performance,
    Psychology,
    Consistency,
    Risk,
}

/// Which derived metric a milestone series is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Total P&L as a percentage of the starting balance.
    AccountGrowthPct,
    WinCount,
    TotalProfit,
    RuleFollowCount,
    CompliancePct,
    /// Longest run of consecutive rule-compliant trades.
    ComplianceRun,
    PsychLogCount,
    /// Sessions logged with the "calm" tag.
    CalmSessionCount,
    /// Longest run of consecutive calm-mood days.
    CalmDayRun,
    FomoSessionCount,
    /// Longest run of consecutive net-profitable days.
    ProfitableDayRun,
    /// Current daily-logging streak.
    LoggingStreak,
    /// Distinct calendar days with at least one trade.
    ActiveDays,
    /// Trades logged with a protective stop loss.
    StopLossCount,
    BestRMultiple,
}

/// One milestone series: a metric measured against an ascending ladder of
/// thresholds, each threshold yielding one achievement. The catalog is
/// plain data so the evaluator stays a single reusable function over
/// whatever table is supplied.
#[derive(Debug, Clone)]
pub struct MilestoneSeries {
    pub id: &'static str,
    pub category: AchievementCategory,
    pub title: &'static str,
    /// Human description template; `{n}` is replaced with the threshold.
    pub description: &'static str,
    pub metric: Metric,
    pub thresholds: &'static [f64],
    /// XP reward per achievement = threshold * multiplier.
    pub xp_multiplier: f64,
    pub icon: &'static str,
}

use AchievementCategory::*;

pub const DEFAULT_CATALOG: &[MilestoneSeries] = &[
    MilestoneSeries {
        id: "grow",
        category: Performance,
        title: "Account Growth %",
        description: "{n}% total account growth achieved.",
        metric: Metric::AccountGrowthPct,
        thresholds: &[
            1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 75.0, 100.0, 200.0,
            500.0,
        ],
        xp_multiplier: 50.0,
        icon: "🚀",
    },
    MilestoneSeries {
        id: "totalwin",
        category: Performance,
        title: "Winning Hand",
        description: "Achieve {n} profitable trades.",
        metric: Metric::WinCount,
        thresholds: &[
            1.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 150.0, 200.0,
            300.0, 500.0,
        ],
        xp_multiplier: 15.0,
        icon: "💰",
    },
    MilestoneSeries {
        id: "profit_val",
        category: Performance,
        title: "Profit Tier ($)",
        description: "Achieve ${n} total realized profit.",
        metric: Metric::TotalProfit,
        thresholds: &[
            10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0,
        ],
        xp_multiplier: 1.0,
        icon: "💎",
    },
    MilestoneSeries {
        id: "green_days",
        category: Performance,
        title: "Green Days",
        description: "Close {n} net-profitable days in a row.",
        metric: Metric::ProfitableDayRun,
        thresholds: &[2.0, 3.0, 5.0, 7.0, 10.0, 14.0, 21.0],
        xp_multiplier: 40.0,
        icon: "📊",
    },
    MilestoneSeries {
        id: "rules",
        category: Discipline,
        title: "Code Keeper",
        description: "Log {n} trades that strictly followed your rules.",
        metric: Metric::RuleFollowCount,
        thresholds: &[
            1.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 150.0, 200.0,
            300.0, 500.0,
        ],
        xp_multiplier: 20.0,
        icon: "🛡️",
    },
    MilestoneSeries {
        id: "compliance",
        category: Discipline,
        title: "Execution Accuracy",
        description: "Maintain a {n}% rule compliance rate.",
        metric: Metric::CompliancePct,
        thresholds: &[50.0, 60.0, 70.0, 80.0, 90.0, 95.0, 100.0],
        xp_multiplier: 100.0,
        icon: "🎯",
    },
    MilestoneSeries {
        id: "zero_fail",
        category: Discipline,
        title: "Flawless Run",
        description: "Log {n} trades in a row with zero rule violations.",
        metric: Metric::ComplianceRun,
        thresholds: &[3.0, 5.0, 7.0, 10.0, 15.0, 20.0],
        xp_multiplier: 50.0,
        icon: "⚔️",
    },
    MilestoneSeries {
        id: "psych",
        category: Psychology,
        title: "Self Explorer",
        description: "Complete {n} psychological audit entries.",
        metric: Metric::PsychLogCount,
        thresholds: &[
            1.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
            150.0, 200.0,
        ],
        xp_multiplier: 25.0,
        icon: "🧘",
    },
    MilestoneSeries {
        id: "zen",
        category: Psychology,
        title: "Zen Pulse",
        description: "Log {n} sessions with \"Calm\" dominant emotion.",
        metric: Metric::CalmSessionCount,
        thresholds: &[1.0, 3.0, 5.0, 10.0, 20.0, 30.0, 50.0, 100.0],
        xp_multiplier: 40.0,
        icon: "😌",
    },
    MilestoneSeries {
        id: "serenity",
        category: Psychology,
        title: "Serenity Streak",
        description: "Stay calm for {n} logged days in a row.",
        metric: Metric::CalmDayRun,
        thresholds: &[3.0, 5.0, 7.0, 14.0, 30.0],
        xp_multiplier: 60.0,
        icon: "🌿",
    },
    MilestoneSeries {
        id: "fomo_hunter",
        category: Psychology,
        title: "FOMO Conqueror",
        description: "Identify and log {n} FOMO sessions to reduce bias.",
        metric: Metric::FomoSessionCount,
        thresholds: &[1.0, 5.0, 10.0, 25.0, 50.0],
        xp_multiplier: 30.0,
        icon: "🐭",
    },
    MilestoneSeries {
        id: "streak",
        category: Consistency,
        title: "Unstoppable",
        description: "Reach a daily logging streak of {n} days.",
        metric: Metric::LoggingStreak,
        thresholds: &[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 10.0, 14.0, 21.0, 30.0, 45.0, 60.0, 90.0, 120.0,
            150.0, 180.0, 365.0,
        ],
        xp_multiplier: 100.0,
        icon: "🔥",
    },
    MilestoneSeries {
        id: "totaldays",
        category: Consistency,
        title: "Market Veteran",
        description: "Be active in the market for {n} logged days.",
        metric: Metric::ActiveDays,
        thresholds: &[5.0, 10.0, 30.0, 50.0, 100.0, 150.0, 200.0, 300.0, 500.0],
        xp_multiplier: 20.0,
        icon: "📅",
    },
    MilestoneSeries {
        id: "slusage",
        category: Risk,
        title: "Safe Hands",
        description: "Log {n} trades with a protective stop loss.",
        metric: Metric::StopLossCount,
        thresholds: &[1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 200.0, 300.0, 500.0],
        xp_multiplier: 15.0,
        icon: "🛑",
    },
    MilestoneSeries {
        id: "rmult",
        category: Risk,
        title: "Efficiency Milestone",
        description: "Achieve a trade with at least {n}R profit.",
        metric: Metric::BestRMultiple,
        thresholds: &[
            1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 15.0, 20.0,
        ],
        xp_multiplier: 200.0,
        icon: "📈",
    },
];
