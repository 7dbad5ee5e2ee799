//! Core contracts for tickgauge.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The history provider contract and Yahoo adapter
//! - The appraisal engine (z-score and moving-average heuristics)
//! - Response envelope and structured errors

pub mod adapters;
pub mod appraisal;
pub mod data_source;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod source;

pub use adapters::YahooAdapter;
pub use appraisal::{
    AppraisalReport, IndeterminateKind, MovingAverageOutcome, SkippedSymbol, SymbolSeries,
    ZScoreOutcome,
};
pub use data_source::{HistoryRequest, HistorySource, SourceError, SourceErrorKind};
pub use domain::{Bar, BarSeries, Signal, Symbol, UtcDateTime};
pub use engine::{AppraisalConfig, AppraisalEngine, AppraisalRun};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::ValidationError;
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use source::ProviderId;
