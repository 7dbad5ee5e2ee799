mod appraise;
mod bars;

use std::sync::Arc;

use serde_json::Value;
use tickgauge_core::{
    Envelope, EnvelopeError, EnvelopeMeta, HistorySource, NoopHttpClient, ProviderId,
    ReqwestHttpClient, YahooAdapter,
};
use uuid::Uuid;

use crate::cli::{Cli, Command, SourceSelector};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
        }
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let source = build_source(cli);

    let command_result = match &cli.command {
        Command::Appraise(args) => appraise::run(args, Arc::clone(&source), cli.timeout_ms).await?,
        Command::Bars(args) => bars::run(args, Arc::clone(&source), cli.timeout_ms).await?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        "v1.0.0",
        provider_for(cli.source),
        latency_ms,
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

fn build_source(cli: &Cli) -> Arc<dyn HistorySource> {
    if cli.offline {
        Arc::new(YahooAdapter::with_http_client(Arc::new(NoopHttpClient)))
    } else {
        Arc::new(YahooAdapter::with_http_client(Arc::new(
            ReqwestHttpClient::new(),
        )))
    }
}

const fn provider_for(source: SourceSelector) -> ProviderId {
    match source {
        SourceSelector::Yahoo => ProviderId::Yahoo,
    }
}
