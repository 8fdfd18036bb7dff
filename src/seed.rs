//! Sample records installed into fresh guest sessions so the analytics
//! screens have something to show before the first real log.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::models::{PsychologyEntry, Side, Trade, TradingRule, EMOTIONS};

pub fn sample_rules(user_id: &str) -> Vec<TradingRule> {
    [
        "Max 3 losses per day",
        "Never trade without a Stop Loss",
        "Wait for 2nd candle confirmation",
        "No trading after 8 PM",
    ]
    .iter()
    .enumerate()
    .map(|(i, description)| TradingRule {
        id: format!("rule-{}", i + 1),
        user_id: user_id.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn sample_trades(user_id: &str) -> Vec<Trade> {
    let mut rng = rand::thread_rng();
    let assets = ["XAUUSD", "USDJPY"];
    let today = Utc::now().date_naive();

    (0..10i64)
        .map(|i| {
            let is_win = rng.gen_bool(0.6);
            let pl = if is_win {
                rng.gen_range(100..600) as f64
            } else {
                -(rng.gen_range(50..350) as f64)
            };
            Trade {
                id: format!("sample-{}", i),
                user_id: user_id.to_string(),
                date: today - Duration::days(i),
                asset: assets[i as usize % 2].to_string(),
                side: if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell },
                lot_size: (rng.gen_range(10..60) as f64) / 100.0,
                profit_loss: pl,
                notes: "Sample trade for platform testing.".to_string(),
                setup: Some(
                    if i % 2 == 0 {
                        "Trend Continuation"
                    } else {
                        "Mean Reversion"
                    }
                    .to_string(),
                ),
                rules_followed: rng.gen_bool(0.8),
                r_multiple: Some(if is_win { 2.5 } else { -1.0 }),
                stop_loss: None,
                session: None,
                auto_flags: Vec::new(),
            }
        })
        .collect()
}

pub fn sample_psychology(user_id: &str) -> Vec<PsychologyEntry> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    (0..5i64)
        .map(|i| {
            let date = today - Duration::days(i);
            PsychologyEntry {
                id: format!("psych-sample-{}", i),
                user_id: user_id.to_string(),
                date,
                emotions: vec![
                    EMOTIONS[i as usize % EMOTIONS.len()].to_string(),
                    EMOTIONS[(i as usize + 2) % EMOTIONS.len()].to_string(),
                ],
                intensity: rng.gen_range(3..=7),
                notes: if i % 2 == 0 {
                    "Felt very disciplined today. Followed all setups without hesitation."
                } else {
                    "Felt a bit of FOMO during the NY open. Need to stay calmer."
                }
                .to_string(),
                timestamp: (Utc::now() - Duration::days(i)).timestamp_millis(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_trades_shape() {
        let trades = sample_trades("guest");
        assert_eq!(trades.len(), 10);
        assert!(trades.iter().all(|t| t.user_id == "guest"));
        assert!(trades.iter().all(|t| t.profit_loss != 0.0));
    }

    #[test]
    fn test_sample_psychology_uses_known_emotions() {
        let entries = sample_psychology("guest");
        assert_eq!(entries.len(), 5);
        for entry in &entries {
            assert!(!entry.emotions.is_empty());
            assert!(entry
                .emotions
                .iter()
                .all(|e| EMOTIONS.contains(&e.as_str())));
            assert!((1..=10).contains(&entry.intensity));
        }
    }

    #[test]
    fn test_sample_rules_fixed_set() {
        assert_eq!(sample_rules("guest").len(), 4);
    }
}
