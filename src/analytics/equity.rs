use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// One point on the running-balance curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub label: String,
    pub equity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityReport {
    /// trades.len() + 1 points; the first is the starting balance.
    pub curve: Vec<EquityPoint>,
    /// Largest peak-to-trough decline, as a percentage of the peak that was
    /// current when the decline bottomed out.
    pub max_drawdown_pct: f64,
    pub current_equity: f64,
}

/// Walks the trade history in date order and tracks the running balance and
/// the deepest excursion below the running peak. Same-date trades keep their
/// input order (stable sort).
pub fn compute(starting_balance: f64, trades: &[Trade]) -> EquityReport {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut equity = starting_balance;
    let mut peak = starting_balance;
    let mut max_dd_value = 0.0_f64;
    let mut peak_at_max_dd = starting_balance;

    let mut curve = Vec::with_capacity(sorted.len() + 1);
    curve.push(EquityPoint {
        label: "Start".to_string(),
        equity,
    });

    for (idx, trade) in sorted.iter().enumerate() {
        equity += trade.profit_loss;
        curve.push(EquityPoint {
            label: format!("T{}", idx + 1),
            equity,
        });
        if equity > peak {
            peak = equity;
        }
        let dd = peak - equity;
        if dd > max_dd_value {
            max_dd_value = dd;
            peak_at_max_dd = peak;
        }
    }

    // Drawdown is relative to the peak in force when the trough occurred,
    // not the global peak.
    let max_drawdown_pct = if max_dd_value > 0.0 && peak_at_max_dd != 0.0 {
        max_dd_value / peak_at_max_dd * 100.0
    } else {
        0.0
    };

    EquityReport {
        curve,
        max_drawdown_pct,
        current_equity: equity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use chrono::NaiveDate;

    fn trade_on(day: u32, pl: f64) -> Trade {
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
            rules_followed: true,
            r_multiple: None,
            stop_loss: None,
            session: None,
            auto_flags: Vec::new(),
        }
    }

    #[test]
    fn test_empty_history_is_a_single_point() {
        let report = compute(10_000.0, &[]);
        assert_eq!(report.curve.len(), 1);
        assert_eq!(report.curve[0].equity, 10_000.0);
        assert_eq!(report.max_drawdown_pct, 0.0);
        assert_eq!(report.current_equity, 10_000.0);
    }

    #[test]
    fn test_curve_shape_and_drawdown() {
        let trades = vec![trade_on(1, 500.0), trade_on(2, -200.0), trade_on(3, 300.0)];
        let report = compute(10_000.0, &trades);

        let values: Vec<f64> = report.curve.iter().map(|p| p.equity).collect();
        assert_eq!(values, vec![10_000.0, 10_500.0, 10_300.0, 10_600.0]);

        // 200 below the 10500 peak.
        assert!((report.max_drawdown_pct - 200.0 / 10_500.0 * 100.0).abs() < 1e-9);
        assert_eq!(report.current_equity, 10_600.0);
    }

    #[test]
    fn test_final_point_equals_balance_plus_net() {
        let trades = vec![trade_on(1, 120.0), trade_on(2, -40.0), trade_on(4, 15.5)];
        let report = compute(5_000.0, &trades);
        let net: f64 = trades.iter().map(|t| t.profit_loss).sum();
        let last = report.curve.last().unwrap().equity;
        assert!((last - (5_000.0 + net)).abs() < 1e-9);
    }

    #[test]
    fn test_non_decreasing_equity_has_zero_drawdown() {
        let trades = vec![trade_on(1, 100.0), trade_on(2, 0.0), trade_on(3, 50.0)];
        let report = compute(10_000.0, &trades);
        assert_eq!(report.max_drawdown_pct, 0.0);
    }

    #[test]
    fn test_trades_are_sorted_by_date() {
        let trades = vec![trade_on(9, -100.0), trade_on(1, 300.0)];
        let report = compute(1_000.0, &trades);
        let values: Vec<f64> = report.curve.iter().map(|p| p.equity).collect();
        assert_eq!(values, vec![1_000.0, 1_300.0, 1_200.0]);
    }

    #[test]
    fn test_drawdown_uses_peak_at_trough() {
        // Peak 1100, drop to 880 (dd 220 @ peak 1100 = 20%), then new peak
        // 1400 and a smaller relative drop.
        let trades = vec![
            trade_on(1, 100.0),
            trade_on(2, -220.0),
            trade_on(3, 520.0),
            trade_on(4, -100.0),
        ];
        let report = compute(1_000.0, &trades);
        assert!((report.max_drawdown_pct - 220.0 / 1_100.0 * 100.0).abs() < 1e-9);
    }
}
