//! The appraisal engine: pure scoring functions plus the report they fill.
//!
//! Two heuristics are computed per symbol and kept deliberately separate;
//! nothing in this module reconciles the z-score map with the moving-average
//! map.

pub mod moving_average;
pub mod returns;
pub mod zscore;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Signal, Symbol};

pub use moving_average::MovingAverageOutcome;
pub use returns::SymbolSeries;
pub use zscore::{IndeterminateKind, ZScoreOutcome};

/// A symbol excluded from both appraisals because its history never arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: Symbol,
    pub reason: String,
    pub retryable: bool,
}

/// Final per-run appraisal output: two independent signal maps plus the
/// symbols that could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppraisalReport {
    pub zscore: BTreeMap<Symbol, Signal>,
    pub moving_average: BTreeMap<Symbol, Signal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSymbol>,
}

impl AppraisalReport {
    /// Number of symbols that received signals.
    pub fn appraised_count(&self) -> usize {
        self.zscore.len()
    }
}
