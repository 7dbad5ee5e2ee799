use serde_json::Value;

use tickgauge_core::{AppraisalReport, Envelope};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            println!("{payload}");
        }
        OutputFormat::Table => render_table(envelope)?,
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<(), CliError> {
    println!("request_id  : {}", envelope.meta.request_id);
    println!("schema      : {}", envelope.meta.schema_version);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!("source      : {}", envelope.meta.source);
    println!("latency_ms  : {}", envelope.meta.latency_ms);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    // Appraisal payloads get a signal table; everything else falls back to a
    // pretty JSON data block.
    match serde_json::from_value::<AppraisalReport>(envelope.data.clone()) {
        Ok(report) => render_report(&report),
        Err(_) => {
            println!("data:");
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                println!("  {line}");
            }
        }
    }

    if !envelope.errors.is_empty() {
        println!("errors:");
        for error in &envelope.errors {
            println!("  - {}: {}", error.code, error.message);
        }
    }

    Ok(())
}

fn render_report(report: &AppraisalReport) {
    println!();
    println!("{:<12} {:<8} {:<8}", "symbol", "z-score", "sma");
    for (symbol, z_signal) in &report.zscore {
        let ma_signal = report
            .moving_average
            .get(symbol)
            .map_or("-", |signal| signal.as_str());
        println!(
            "{:<12} {:<8} {:<8}",
            symbol.as_str(),
            z_signal.as_str(),
            ma_signal
        );
    }

    if !report.skipped.is_empty() {
        println!("skipped:");
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.symbol, skipped.reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickgauge_core::{Signal, SkippedSymbol, Symbol};

    fn sample_report() -> AppraisalReport {
        let aapl = Symbol::parse("AAPL").expect("valid symbol");
        let msft = Symbol::parse("MSFT").expect("valid symbol");

        let mut report = AppraisalReport::default();
        report.zscore.insert(aapl.clone(), Signal::Buy);
        report.zscore.insert(msft.clone(), Signal::Hold);
        report.moving_average.insert(aapl, Signal::Hold);
        report.moving_average.insert(msft, Signal::Sell);
        report.skipped.push(SkippedSymbol {
            symbol: Symbol::parse("NOSUCH").expect("valid symbol"),
            reason: String::from("no history available for symbol 'NOSUCH'"),
            retryable: false,
        });
        report
    }

    #[test]
    fn appraisal_payload_round_trips_through_value() {
        let report = sample_report();
        let value = serde_json::to_value(&report).expect("serialize");
        let parsed: AppraisalReport = serde_json::from_value(value).expect("deserialize");
        assert_eq!(parsed, report);
    }

    #[test]
    fn non_appraisal_payload_does_not_parse_as_report() {
        let value = serde_json::json!({ "series": null });
        assert!(serde_json::from_value::<AppraisalReport>(value).is_err());
    }
}
