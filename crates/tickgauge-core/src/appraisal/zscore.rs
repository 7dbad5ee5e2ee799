//! Z-score appraisal of the latest close against its trailing window.
//!
//! The latest close is itself part of the window used for the mean and the
//! sample standard deviation; that self-inclusion is deliberate and load
//! bearing for the decision thresholds below.

use serde::Serialize;

use crate::Signal;

/// Default trailing window for the appraisal policy.
pub const DEFAULT_WINDOW: usize = 30;

/// Minimum observations for a defined sample standard deviation.
pub const MIN_WINDOW: usize = 2;

/// Why a statistic could not be computed for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateKind {
    /// All window closes identical; the z-score is undefined.
    ZeroStdDev,
    /// Fewer than [`MIN_WINDOW`] closes available.
    InsufficientHistory,
}

/// Outcome of a z-score appraisal for one symbol.
///
/// Indeterminate statistics are kept distinguishable rather than silently
/// coerced; [`ZScoreOutcome::signal`] resolves them to HOLD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZScoreOutcome {
    Scored { z: f64, signal: Signal },
    Indeterminate(IndeterminateKind),
}

impl ZScoreOutcome {
    pub fn signal(&self) -> Signal {
        match self {
            Self::Scored { signal, .. } => *signal,
            Self::Indeterminate(_) => Signal::Hold,
        }
    }

    pub fn z(&self) -> Option<f64> {
        match self {
            Self::Scored { z, .. } => Some(*z),
            Self::Indeterminate(_) => None,
        }
    }
}

/// Appraise the most recent close of `closes` against the trailing `window`.
///
/// Symbols with fewer than `window` closes are judged on what is available,
/// down to the [`MIN_WINDOW`] floor.
pub fn appraise(closes: &[f64], window: usize) -> ZScoreOutcome {
    let start = closes.len().saturating_sub(window);
    let window_closes = &closes[start..];

    if window_closes.len() < MIN_WINDOW {
        return ZScoreOutcome::Indeterminate(IndeterminateKind::InsufficientHistory);
    }

    let mean = window_closes.iter().sum::<f64>() / window_closes.len() as f64;
    let std = sample_std(window_closes, mean);
    if std == 0.0 {
        return ZScoreOutcome::Indeterminate(IndeterminateKind::ZeroStdDev);
    }

    let latest = window_closes[window_closes.len() - 1];
    let z = (latest - mean) / std;

    // Boundary values z == 1 and z == -1 fall through to HOLD.
    let signal = if z > 1.0 {
        Signal::Sell
    } else if z < -1.0 {
        Signal::Buy
    } else {
        Signal::Hold
    };

    ZScoreOutcome::Scored { z, signal }
}

/// Sample standard deviation (ddof = 1).
fn sample_std(values: &[f64], mean: f64) -> f64 {
    let sum_sq = values
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
