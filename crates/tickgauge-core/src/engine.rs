//! Orchestration: fetch each symbol's history, run both appraisers, and
//! collect the two signal maps.
//!
//! Every failure is contained at the symbol boundary: a symbol whose fetch
//! fails (or returns no bars) is recorded as skipped and the run continues.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::appraisal::{moving_average, zscore, AppraisalReport, SkippedSymbol};
use crate::data_source::{HistoryRequest, HistorySource, DEFAULT_LOOKBACK, DEFAULT_TIMEOUT_MS};
use crate::{Symbol, SymbolSeries, ValidationError};

/// Tunables for one appraisal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppraisalConfig {
    /// Trailing window of closes fed to both appraisers.
    pub window: usize,
    /// SMA periods: short, medium, long.
    pub sma_periods: [usize; 3],
    /// Daily bars requested from the provider per symbol.
    pub lookback: usize,
    /// Per-symbol fetch timeout budget.
    pub timeout_ms: u64,
}

impl Default for AppraisalConfig {
    fn default() -> Self {
        Self {
            window: zscore::DEFAULT_WINDOW,
            sma_periods: moving_average::DEFAULT_PERIODS,
            lookback: DEFAULT_LOOKBACK,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AppraisalConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window < zscore::MIN_WINDOW {
            return Err(ValidationError::WindowTooSmall {
                min: zscore::MIN_WINDOW,
                got: self.window,
            });
        }
        Ok(())
    }
}

/// Everything produced by one appraisal pass. Held in memory only; nothing
/// is persisted between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AppraisalRun {
    /// ROI-annotated history per successfully fetched symbol.
    pub datasets: Vec<SymbolSeries>,
    pub report: AppraisalReport,
}

/// Drives fetch-then-appraise across a symbol list.
pub struct AppraisalEngine {
    source: Arc<dyn HistorySource>,
    config: AppraisalConfig,
}

impl AppraisalEngine {
    pub fn new(source: Arc<dyn HistorySource>, config: AppraisalConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AppraisalConfig {
        &self.config
    }

    /// Fetch and appraise each symbol sequentially.
    ///
    /// Fetches are independent and tolerated individually: a failing symbol
    /// is excluded from both signal maps and named in `report.skipped`, with
    /// no effect on the remaining symbols.
    pub async fn run(&self, symbols: &[Symbol]) -> AppraisalRun {
        let mut run = AppraisalRun {
            datasets: Vec::with_capacity(symbols.len()),
            report: AppraisalReport::default(),
        };

        // Dedup on the input, not the report, so a repeated symbol is fetched
        // once whether its first attempt succeeded or was skipped.
        let mut seen = BTreeSet::new();

        for symbol in symbols {
            if !seen.insert(symbol.clone()) {
                continue;
            }

            let request = match HistoryRequest::new(
                symbol.clone(),
                self.config.lookback,
                self.config.timeout_ms,
            ) {
                Ok(request) => request,
                Err(error) => {
                    self.skip(&mut run.report, symbol, &error.to_string(), error.retryable());
                    continue;
                }
            };

            let series = match self.source.history(request).await {
                Ok(series) if series.is_empty() => {
                    self.skip(&mut run.report, symbol, "provider returned no history", false);
                    continue;
                }
                Ok(series) => series,
                Err(error) => {
                    self.skip(&mut run.report, symbol, &error.to_string(), error.retryable());
                    continue;
                }
            };

            debug!(symbol = %symbol, bars = series.len(), "fetched history");

            let dataset = SymbolSeries::annotate(series);
            let window = dataset.series.trailing_closes(self.config.window);

            let z_outcome = zscore::appraise(&window, self.config.window);
            let ma_outcome = moving_average::appraise(&window, self.config.sma_periods);

            run.report.zscore.insert(symbol.clone(), z_outcome.signal());
            run.report
                .moving_average
                .insert(symbol.clone(), ma_outcome.signal);
            run.datasets.push(dataset);
        }

        run
    }

    fn skip(&self, report: &mut AppraisalReport, symbol: &Symbol, reason: &str, retryable: bool) {
        warn!(symbol = %symbol, reason = %reason, "history fetch failed; skipping symbol");
        report.skipped.push(SkippedSymbol {
            symbol: symbol.clone(),
            reason: reason.to_owned(),
            retryable,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::YahooAdapter;

    #[test]
    fn default_config_matches_appraisal_policy() {
        let config = AppraisalConfig::default();
        assert_eq!(config.window, 30);
        assert_eq!(config.sma_periods, [5, 15, 30]);
        config.validate().expect("default config must be valid");
    }

    #[test]
    fn undersized_window_is_rejected() {
        let config = AppraisalConfig {
            window: 1,
            ..AppraisalConfig::default()
        };
        let err = config.validate().expect_err("must fail");
        assert!(matches!(err, ValidationError::WindowTooSmall { min: 2, got: 1 }));
    }

    #[tokio::test]
    async fn duplicate_symbols_are_appraised_once() {
        let engine = AppraisalEngine::new(
            Arc::new(YahooAdapter::default()),
            AppraisalConfig::default(),
        );
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let run = engine.run(&[symbol.clone(), symbol]).await;
        assert_eq!(run.report.appraised_count(), 1);
        assert_eq!(run.datasets.len(), 1);
    }
}
