use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime, ValidationError};

/// Daily OHLCV bar record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Per-symbol daily history, ordered by timestamp ascending with no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: Symbol, bars: Vec<Bar>) -> Result<Self, ValidationError> {
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].ts <= pair[0].ts {
                return Err(ValidationError::BarsOutOfOrder { index: index + 1 });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// The most recent `n` closing prices, fewer when the history is shorter.
    pub fn trailing_closes(&self, n: usize) -> Vec<f64> {
        let start = self.bars.len().saturating_sub(n);
        self.bars[start..].iter().map(|bar| bar.close).collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: &str, close: f64) -> Bar {
        let ts = UtcDateTime::parse(ts).expect("timestamp");
        Bar::new(ts, close, close, close, close, Some(1_000)).expect("bar")
    }

    #[test]
    fn rejects_invalid_bar_bounds() {
        let ts = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp");
        let err = Bar::new(ts, 10.0, 12.0, 9.0, 12.5, Some(10)).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_non_finite_price() {
        let ts = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp");
        let err = Bar::new(ts, f64::NAN, 12.0, 9.0, 10.0, None).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { field: "open" }));
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let bars = vec![
            bar("2024-01-01T00:00:00Z", 100.0),
            bar("2024-01-01T00:00:00Z", 101.0),
        ];
        let err = BarSeries::new(symbol, bars).expect_err("must fail");
        assert!(matches!(err, ValidationError::BarsOutOfOrder { index: 1 }));
    }

    #[test]
    fn trailing_closes_clips_to_available_history() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let bars = vec![
            bar("2024-01-01T00:00:00Z", 100.0),
            bar("2024-01-02T00:00:00Z", 101.0),
            bar("2024-01-03T00:00:00Z", 102.0),
        ];
        let series = BarSeries::new(symbol, bars).expect("series");

        assert_eq!(series.trailing_closes(2), vec![101.0, 102.0]);
        assert_eq!(series.trailing_closes(10), vec![100.0, 101.0, 102.0]);
    }
}
