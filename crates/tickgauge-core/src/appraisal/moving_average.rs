//! Trend-agreement appraisal across short/medium/long simple moving averages.
//!
//! A signal fires only when all three SMAs sit strictly on the same side of
//! the latest close. An SMA whose period exceeds the available history is
//! undefined, and any undefined delta routes the decision to HOLD.

use serde::Serialize;

use crate::Signal;

/// Default SMA periods: short, medium, long.
pub const DEFAULT_PERIODS: [usize; 3] = [5, 15, 30];

/// Outcome of a moving-average appraisal for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAverageOutcome {
    /// `sma_p(latest) - close(latest)` per period; `None` when the period
    /// exceeds the available history.
    pub deltas: [Option<f64>; 3],
    pub signal: Signal,
}

/// Appraise trend agreement over the trailing closes.
///
/// `closes` is the trailing window (the default policy feeds the last 30
/// bars); each SMA is taken at the most recent position.
pub fn appraise(closes: &[f64], periods: [usize; 3]) -> MovingAverageOutcome {
    let deltas = periods.map(|period| {
        let sma = trailing_sma(closes, period)?;
        let latest = *closes.last()?;
        Some(sma - latest)
    });

    let all_positive = deltas.iter().all(|delta| matches!(delta, Some(d) if *d > 0.0));
    let all_negative = deltas.iter().all(|delta| matches!(delta, Some(d) if *d < 0.0));

    let signal = if all_positive {
        Signal::Buy
    } else if all_negative {
        Signal::Sell
    } else {
        Signal::Hold
    };

    MovingAverageOutcome { deltas, signal }
}

/// Simple moving average over the final `period` closes, undefined when
/// fewer than `period` closes exist.
fn trailing_sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let tail = &closes[closes.len() - period..];
    Some(tail.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_series_puts_all_smas_below_close_and_signals_sell() {
        let closes: Vec<f64> = (1..=30).map(|v| v as f64).collect();
        let outcome = appraise(&closes, DEFAULT_PERIODS);

        for delta in outcome.deltas {
            assert!(delta.expect("defined") < 0.0);
        }
        assert_eq!(outcome.signal, Signal::Sell);
    }

    #[test]
    fn falling_series_puts_all_smas_above_close_and_signals_buy() {
        let closes: Vec<f64> = (1..=30).rev().map(|v| v as f64).collect();
        let outcome = appraise(&closes, DEFAULT_PERIODS);

        for delta in outcome.deltas {
            assert!(delta.expect("defined") > 0.0);
        }
        assert_eq!(outcome.signal, Signal::Buy);
    }

    #[test]
    fn mixed_sign_deltas_hold() {
        // Long decline followed by a short rebound: the 5-period SMA ends up
        // below the latest close while the 30-period SMA stays above it.
        let mut closes: Vec<f64> = (0..25).map(|v| 100.0 - v as f64).collect();
        closes.extend([70.0, 74.0, 78.0, 82.0, 86.0]);
        assert_eq!(closes.len(), 30);

        let outcome = appraise(&closes, DEFAULT_PERIODS);
        let [short, _, long] = outcome.deltas;
        assert!(short.expect("defined") < 0.0);
        assert!(long.expect("defined") > 0.0);
        assert_eq!(outcome.signal, Signal::Hold);
    }

    #[test]
    fn short_history_leaves_long_sma_undefined_and_holds() {
        let closes: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let outcome = appraise(&closes, DEFAULT_PERIODS);

        let [short, medium, long] = outcome.deltas;
        assert!(short.is_some());
        assert!(medium.is_none());
        assert!(long.is_none());
        assert_eq!(outcome.signal, Signal::Hold);
    }

    #[test]
    fn zero_delta_holds() {
        // Constant closes: every SMA equals the latest close exactly.
        let closes = vec![50.0; 30];
        let outcome = appraise(&closes, DEFAULT_PERIODS);

        for delta in outcome.deltas {
            assert_eq!(delta, Some(0.0));
        }
        assert_eq!(outcome.signal, Signal::Hold);
    }

    #[test]
    fn empty_window_holds() {
        let outcome = appraise(&[], DEFAULT_PERIODS);
        assert_eq!(outcome.deltas, [None, None, None]);
        assert_eq!(outcome.signal, Signal::Hold);
    }
}
