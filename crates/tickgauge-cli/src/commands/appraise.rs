use std::io;
use std::sync::Arc;
use std::time::Instant;

use tickgauge_core::{
    AppraisalConfig, AppraisalEngine, EnvelopeError, HistorySource, ProviderId, Symbol,
};

use crate::cli::AppraiseArgs;
use crate::error::CliError;
use crate::input;

use super::CommandResult;

pub async fn run(
    args: &AppraiseArgs,
    source: Arc<dyn HistorySource>,
    timeout_ms: u64,
) -> Result<CommandResult, CliError> {
    let symbols = resolve_symbols(args)?;

    let config = AppraisalConfig {
        window: args.window,
        lookback: args.lookback,
        timeout_ms,
        ..AppraisalConfig::default()
    };
    config.validate()?;

    let engine = AppraisalEngine::new(source, config);
    let started = Instant::now();
    let run = engine.run(&symbols).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let mut errors = Vec::with_capacity(run.report.skipped.len());
    for skipped in &run.report.skipped {
        let error = EnvelopeError::new(
            "fetch.failed",
            format!("{}: {}", skipped.symbol, skipped.reason),
        )?
        .with_retryable(skipped.retryable)
        .with_source(ProviderId::Yahoo);
        errors.push(error);
    }

    let data = serde_json::to_value(&run.report)?;
    Ok(CommandResult::ok(data)
        .with_errors(errors)
        .with_latency(latency_ms))
}

fn resolve_symbols(args: &AppraiseArgs) -> Result<Vec<Symbol>, CliError> {
    if args.symbols.is_empty() {
        // Prompt on stderr so stdout stays machine-readable.
        let stdin = io::stdin();
        let stderr = io::stderr();
        let mut reader = stdin.lock();
        let mut writer = stderr.lock();
        return input::prompt_symbols(&mut reader, &mut writer).map_err(CliError::from);
    }

    Symbol::parse_list(&args.symbols.join(",")).map_err(CliError::from)
}
