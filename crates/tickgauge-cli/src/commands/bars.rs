use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use tickgauge_core::{
    BarSeries, EnvelopeError, HistoryRequest, HistorySource, ProviderId, Symbol,
};

use crate::cli::BarsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct BarsResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<BarSeries>,
}

pub async fn run(
    args: &BarsArgs,
    source: Arc<dyn HistorySource>,
    timeout_ms: u64,
) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let request = HistoryRequest::new(symbol, args.lookback, timeout_ms)
        .map_err(|error| CliError::Command(error.to_string()))?;

    let started = Instant::now();
    match source.history(request).await {
        Ok(series) => {
            let data = serde_json::to_value(BarsResponseData {
                series: Some(series),
            })?;
            Ok(CommandResult::ok(data).with_latency(started.elapsed().as_millis() as u64))
        }
        Err(error) => {
            let envelope_error = EnvelopeError::new(error.code(), error.message())?
                .with_retryable(error.retryable())
                .with_source(ProviderId::Yahoo);
            let data = serde_json::to_value(BarsResponseData { series: None })?;
            Ok(CommandResult::ok(data)
                .with_errors(vec![envelope_error])
                .with_latency(started.elapsed().as_millis() as u64))
        }
    }
}
