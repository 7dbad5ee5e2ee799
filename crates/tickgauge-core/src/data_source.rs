//! History source trait and request types.
//!
//! A history source supplies one thing: an ordered daily OHLCV history per
//! symbol. Provider failures are per-symbol and structured so the engine can
//! skip the symbol and keep going.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{BarSeries, ProviderId, Symbol};

/// Default trailing history depth, roughly three months of daily bars.
pub const DEFAULT_LOOKBACK: usize = 63;

/// Default per-symbol fetch timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    UnknownSymbol,
    Internal,
}

/// Structured source error surfaced per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unknown_symbol(symbol: &Symbol) -> Self {
        Self {
            kind: SourceErrorKind::UnknownSymbol,
            message: format!("no history available for symbol '{symbol}'"),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::UnknownSymbol => "source.unknown_symbol",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    /// Number of trailing daily bars requested.
    pub lookback: usize,
    /// Transport timeout budget; a timeout counts as a per-symbol failure.
    pub timeout_ms: u64,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, lookback: usize, timeout_ms: u64) -> Result<Self, SourceError> {
        if lookback == 0 {
            return Err(SourceError::invalid_request(
                "history request lookback must be greater than zero",
            ));
        }
        Ok(Self {
            symbol,
            lookback,
            timeout_ms,
        })
    }
}

/// History provider contract.
///
/// Implementations must be `Send + Sync`; the engine treats every failure as
/// scoped to the requested symbol.
pub trait HistorySource: Send + Sync {
    /// Returns the unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetches the trailing daily history for one symbol.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the symbol is unknown, the request is
    /// invalid, or the provider is unreachable within the timeout budget.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BarSeries, SourceError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_lookback() {
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let error = HistoryRequest::new(symbol, 0, 1_000).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::InvalidRequest);
        assert!(error.message().contains("lookback"));
    }
}
