use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{HistoryRequest, HistorySource, SourceError};
use crate::http_client::{HttpClient, HttpError, HttpRequest, NoopHttpClient};
use crate::{Bar, BarSeries, ProviderId, Symbol, UtcDateTime, ValidationError};

/// Yahoo Finance chart adapter supporting both real API calls and mock mode.
///
/// With a mock transport the adapter serves deterministic seeded bars, which
/// keeps the CLI and tests fully offline.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
        }
    }
}

impl HistorySource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BarSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if req.lookback == 0 {
                return Err(SourceError::invalid_request(
                    "yahoo history request lookback must be greater than zero",
                ));
            }

            if self.use_real_api {
                self.fetch_real_history(&req).await
            } else {
                self.fetch_fake_history(&req).await
            }
        })
    }
}

impl YahooAdapter {
    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<BarSeries, SourceError> {
        let endpoint = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval=1d",
            urlencoding::encode(req.symbol.as_str()),
            range_for_lookback(req.lookback),
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(req.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(transport_to_error)?;

        if response.status == 404 {
            return Err(SourceError::unknown_symbol(&req.symbol));
        }
        if response.status == 429 {
            return Err(SourceError::rate_limited("yahoo returned status 429"));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_body(&response.body, req)
    }

    async fn fetch_fake_history(&self, req: &HistoryRequest) -> Result<BarSeries, SourceError> {
        // Exercise the transport seam even in mock mode so transport failures
        // still surface as per-symbol errors.
        let probe = HttpRequest::get("https://query1.finance.yahoo.com/v8/finance/chart")
            .with_timeout_ms(req.timeout_ms);
        self.http_client
            .execute(probe)
            .await
            .map_err(transport_to_error)?;

        let now = UtcDateTime::now().unix_seconds();
        let seed = symbol_seed(&req.symbol);
        let mut bars = Vec::with_capacity(req.lookback);

        for index in 0..req.lookback {
            let age_days = req.lookback.saturating_sub(index + 1) as i64;
            let ts = UtcDateTime::from_unix_seconds(now - age_days * 86_400)
                .map_err(validation_to_error)?;
            let base = 90.0 + ((seed + index as u64) % 350) as f64 / 10.0;

            let bar = Bar::new(
                ts,
                base,
                base + 1.20,
                base - 0.80,
                base + 0.30,
                Some(20_000 + (index as u64) * 25),
            )
            .map_err(validation_to_error)?;
            bars.push(bar);
        }

        BarSeries::new(req.symbol.clone(), bars).map_err(validation_to_error)
    }
}

fn parse_chart_body(body: &str, req: &HistoryRequest) -> Result<BarSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &chart_response.chart.error {
        if error.code.eq_ignore_ascii_case("not found") {
            return Err(SourceError::unknown_symbol(&req.symbol));
        }
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}: {}",
            error.code, error.description
        )));
    }

    let result = chart_response
        .chart
        .result
        .first()
        .ok_or_else(|| SourceError::unknown_symbol(&req.symbol))?;

    let timestamp = result
        .timestamp
        .as_ref()
        .ok_or_else(|| SourceError::internal("no timestamp data in chart response"))?;
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| SourceError::internal("no quote data in chart response"))?;

    let mut bars = Vec::new();
    for (i, &ts_value) in timestamp.iter().enumerate() {
        let ts = UtcDateTime::from_unix_seconds(ts_value).map_err(validation_to_error)?;

        // Yahoo pads holidays with nulls; a bar exists only when all four
        // OHLC values are present.
        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) {
            let volume = quote.volume.get(i).copied().flatten().map(|v| v as u64);

            if let Ok(bar) = Bar::new(ts, *open, *high, *low, *close, volume) {
                bars.push(bar);
            }
        }
    }

    // Trailing window: keep the most recent bars, not the oldest.
    if bars.len() > req.lookback {
        bars.drain(..bars.len() - req.lookback);
    }

    BarSeries::new(req.symbol.clone(), bars).map_err(validation_to_error)
}

/// Smallest Yahoo range parameter that covers the requested lookback.
fn range_for_lookback(lookback: usize) -> &'static str {
    match lookback {
        0..=5 => "5d",
        6..=22 => "1mo",
        23..=63 => "3mo",
        64..=126 => "6mo",
        _ => "1y",
    }
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::internal(error.to_string())
}

/// Retryable transport failures read as the provider being unavailable;
/// everything else is an internal fault that a retry will not fix.
fn transport_to_error(error: HttpError) -> SourceError {
    let message = format!("yahoo transport error: {}", error.message());
    if error.retryable() {
        SourceError::unavailable(message)
    } else {
        SourceError::internal(message)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Vec<YahooChartResult>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::HttpResponse;

    struct FailingHttpClient {
        error: HttpError,
    }

    impl HttpClient for FailingHttpClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let error = self.error.clone();
            Box::pin(async move { Err(error) })
        }

        fn is_mock(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn retryable_transport_failure_reads_as_unavailable() {
        let adapter = YahooAdapter::with_http_client(Arc::new(FailingHttpClient {
            error: HttpError::new("connection reset"),
        }));
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let request = HistoryRequest::new(symbol, 30, 1_000).expect("valid request");

        let error = adapter.history(request).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.retryable());
    }

    #[tokio::test]
    async fn non_retryable_transport_failure_reads_as_internal() {
        let adapter = YahooAdapter::with_http_client(Arc::new(FailingHttpClient {
            error: HttpError::non_retryable("request failed: builder error"),
        }));
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let request = HistoryRequest::new(symbol, 30, 1_000).expect("valid request");

        let error = adapter.history(request).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Internal);
        assert!(!error.retryable());
    }

    #[tokio::test]
    async fn mock_mode_serves_requested_lookback() {
        let adapter = YahooAdapter::default();
        let symbol = Symbol::parse("AAPL").expect("valid symbol");
        let request = HistoryRequest::new(symbol, 10, 1_000).expect("valid request");

        let series = adapter.history(request).await.expect("history");
        assert_eq!(series.len(), 10);
        for pair in series.bars.windows(2) {
            assert!(pair[0].ts < pair[1].ts, "bars must be date ascending");
        }
    }

    #[tokio::test]
    async fn chart_error_maps_to_unknown_symbol() {
        let symbol = Symbol::parse("NOSUCH").expect("valid symbol");
        let request = HistoryRequest::new(symbol, 30, 1_000).expect("valid request");
        let body = r#"{"chart":{"result":[],"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        let error = parse_chart_body(body, &request).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::UnknownSymbol);
        assert!(error.message().contains("NOSUCH"));
    }

    #[test]
    fn chart_parse_skips_null_holiday_rows_and_clips_to_lookback() {
        let symbol = Symbol::parse("MSFT").expect("valid symbol");
        let request = HistoryRequest::new(symbol, 2, 1_000).expect("valid request");
        let body = r#"{"chart":{"result":[{"timestamp":[1704067200,1704153600,1704240000],
            "indicators":{"quote":[{
                "open":[10.0,null,12.0],
                "high":[11.0,null,13.0],
                "low":[9.0,null,11.5],
                "close":[10.5,null,12.5],
                "volume":[100,null,300]}]}}],"error":null}}"#;

        let series = parse_chart_body(body, &request).expect("series");
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().expect("bar").close, 12.5);
    }

    #[test]
    fn lookback_selects_covering_range() {
        assert_eq!(range_for_lookback(5), "5d");
        assert_eq!(range_for_lookback(63), "3mo");
        assert_eq!(range_for_lookback(200), "1y");
    }
}
