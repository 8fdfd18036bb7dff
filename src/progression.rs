use chrono::{Duration, NaiveDate};

use crate::models::{User, XP_PER_LEVEL};

/// Fixed XP awards per action kind. Awards do not depend on trade outcome.
pub const XP_TRADE_LOG: u32 = 25;
pub const XP_PSYCHOLOGY_LOG: u32 = 20;

/// Level is a pure function of XP.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Adds XP and recomputes the level from the new total. XP only ever
/// grows, so the level never decreases.
pub fn award_xp(user: &mut User, amount: u32) {
    user.xp += amount;
    user.level = level_for_xp(user.xp);
    log::debug!("user {} awarded {} xp (level {})", user.id, amount, user.level);
}

/// Credits today's activity toward the daily streak, at most once per
/// calendar day. A gap of two or more days resets the count to 1: today's
/// activity restarts it, it never drops to 0.
pub fn touch_streak(user: &mut User, today: NaiveDate) {
    let yesterday = today - Duration::days(1);
    match user.last_activity_date {
        Some(last) if last == today => {}
        Some(last) if last == yesterday => {
            user.streak_count += 1;
            user.last_activity_date = Some(today);
        }
        _ => {
            user.streak_count = 1;
            user.last_activity_date = Some(today);
        }
    }
}
