//! CLI argument definitions for tickgauge.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `appraise` | Appraise one or more symbols with both heuristics |
//! | `bars` | Fetch historical OHLCV bars for one symbol |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--source` | `yahoo` | History provider |
//! | `--timeout-ms` | `10000` | Per-symbol fetch timeout in ms |
//! | `--offline` | `false` | Serve deterministic seeded bars, no network |
//!
//! # Examples
//!
//! ```bash
//! # Appraise a portfolio
//! tickgauge appraise AAPL MSFT GOOGL
//!
//! # Prompt interactively for a comma-separated list
//! tickgauge appraise
//!
//! # Machine-readable output for pipelines
//! tickgauge appraise AAPL --format json --pretty
//!
//! # Inspect the raw history behind a signal
//! tickgauge bars AAPL --lookback 30
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock appraisal CLI.
///
/// Fetches daily price history per symbol and scores it with two independent
/// heuristics: a z-score of the latest close against its trailing window, and
/// a moving-average trend agreement check.
#[derive(Debug, Parser)]
#[command(
    name = "tickgauge",
    author,
    version,
    about = "Heuristic stock appraisal CLI"
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: Human-readable signal table (default)
    /// - json: Single JSON envelope
    /// - ndjson: One JSON object per line
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    ///
    /// Useful for CI/CD pipelines that need strict validation.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// History provider.
    #[arg(long, global = true, value_enum, default_value_t = SourceSelector::Yahoo)]
    pub source: SourceSelector,

    /// Per-symbol fetch timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Serve deterministic seeded history instead of calling the provider.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable signal table for terminal display.
    Table,
    /// Single JSON envelope output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// History provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelector {
    /// Yahoo Finance chart API.
    Yahoo,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Appraise one or more symbols with both heuristics.
    ///
    /// Returns a BUY, SELL, or HOLD signal per symbol from each heuristic.
    /// With no symbol arguments, prompts on stdin for a comma-separated list.
    ///
    /// # Examples
    ///
    ///   tickgauge appraise AAPL
    ///   tickgauge appraise AAPL MSFT GOOGL --pretty --format json
    ///   tickgauge appraise --window 20 --lookback 40 NVDA
    Appraise(AppraiseArgs),

    /// Fetch historical OHLCV bars for one symbol.
    ///
    /// Returns the same trailing daily history the appraisal heuristics
    /// consume, for inspection.
    ///
    /// # Examples
    ///
    ///   tickgauge bars AAPL
    ///   tickgauge bars MSFT --lookback 30 --format json --pretty
    Bars(BarsArgs),
}

/// Arguments for the `appraise` command.
#[derive(Debug, Args)]
pub struct AppraiseArgs {
    /// Market symbols to appraise (e.g., AAPL MSFT GOOGL).
    ///
    /// Omit to be prompted for a comma-separated list.
    #[arg(num_args = 0..)]
    pub symbols: Vec<String>,

    /// Trailing window of closes fed to both heuristics.
    #[arg(long, default_value_t = 30)]
    pub window: usize,

    /// Number of trailing daily bars fetched per symbol.
    #[arg(long, default_value_t = 63)]
    pub lookback: usize,
}

/// Arguments for the `bars` command.
#[derive(Debug, Args)]
pub struct BarsArgs {
    /// Market symbol to fetch bars for.
    pub symbol: String,

    /// Number of trailing daily bars to return.
    #[arg(long, default_value_t = 63)]
    pub lookback: usize,
}
