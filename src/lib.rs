//! Trading Journal Pro core engine: local-device trade and psychology
//! journaling with performance analytics (equity curve, drawdown, win
//! rate, rule compliance) and consistency gamification (XP, levels,
//! streaks, achievements, discipline rank).
//!
//! All persistence is a string-keyed local store; there is no backend and
//! no network call apart from the optional AI coach.

pub mod achievements;
pub mod analytics;
pub mod coach;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod progression;
pub mod seed;
pub mod session;

pub use config::JournalConfig;
pub use error::{JournalError, Result};
pub use session::Journal;
