use serde::Serialize;

use crate::BarSeries;

/// Per-symbol history enriched with period-over-period returns.
///
/// `roi[t]` is the fractional change of close `t` against close `t - 1`; the
/// first element is always `None`, never zero. Neither appraiser consumes the
/// returns today, but they are part of the per-symbol dataset contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolSeries {
    #[serde(flatten)]
    pub series: BarSeries,
    pub roi: Vec<Option<f64>>,
}

impl SymbolSeries {
    pub fn annotate(series: BarSeries) -> Self {
        let roi = period_returns(&series.closes());
        Self { series, roi }
    }
}

/// Period-over-period fractional returns for a close-price sequence.
///
/// The first position has no prior close and is absent; a zero prior close
/// leaves the return undefined rather than infinite.
pub fn period_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;

    for &close in closes {
        let roi = match prev {
            Some(p) if p != 0.0 => Some((close - p) / p),
            _ => None,
        };
        returns.push(roi);
        prev = Some(close);
    }

    returns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bar, Symbol, UtcDateTime};

    #[test]
    fn first_return_is_absent_not_zero() {
        let returns = period_returns(&[100.0, 110.0, 99.0]);

        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], None);
        assert!((returns[1].expect("roi") - 0.10).abs() < 1e-12);
        assert!((returns[2].expect("roi") - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn zero_prior_close_yields_undefined_return() {
        let returns = period_returns(&[0.0, 10.0]);
        assert_eq!(returns, vec![None, None]);
    }

    #[test]
    fn empty_series_yields_empty_annotation() {
        assert!(period_returns(&[]).is_empty());
    }

    #[test]
    fn annotation_matches_bar_count() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let bars = (0..5)
            .map(|day| {
                let ts = UtcDateTime::parse(&format!("2024-01-0{}T00:00:00Z", day + 1))
                    .expect("timestamp");
                let close = 100.0 + day as f64;
                Bar::new(ts, close, close, close, close, None).expect("bar")
            })
            .collect();
        let series = BarSeries::new(symbol, bars).expect("series");

        let annotated = SymbolSeries::annotate(series);
        assert_eq!(annotated.roi.len(), annotated.series.len());
        assert_eq!(annotated.roi[0], None);
    }
}
