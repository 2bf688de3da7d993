//! Error taxonomy for the simulator.
//!
//! [`ConfigError`] is fatal and aborts the run before any output log is
//! produced. [`EngineWarning`] covers conditions that are logged and
//! skipped; they are never returned as a hard `Err` once a run is underway.

use thiserror::Error;

/// Fatal startup failures. Returned from [`crate::config::SimConfig::from_args`]
/// and from file-opening code in `main`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid buffer size: {0}")]
    InvalidBufferSize(String),

    #[error("unknown replacement policy: {0}")]
    UnknownPolicy(String),

    #[error("invalid zone size: {0}")]
    InvalidZoneSize(String),

    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("could not open file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal conditions encountered while processing a workload. These are
/// logged via the `log` facade at the call site and do not interrupt the
/// run; the variants exist so call sites can format a consistent message
/// without callers needing a `Result` plumbed through the hot path.
#[derive(Error, Debug)]
pub enum EngineWarning {
    #[error("line {line}: malformed record: {text}")]
    MalformedRecord { line: usize, text: String },

    #[error("line {line}: unknown policy code {code}")]
    UnknownPolicyCode { line: usize, code: i64 },

    #[error("zone {zone} write of page {page} is non-sequential (expected page {expected})")]
    NonSequentialWrite { zone: u64, page: u64, expected: u64 },

    #[error("zone {zone} write of page {page} would cross zone boundary, clamped")]
    ZoneBoundaryClamped { zone: u64, page: u64 },

    #[error("page {page} zone id {zone} is out of range (max {max_zones} zones)")]
    ZoneOutOfRange { page: u64, zone: u64, max_zones: u64 },

    #[error("no eviction victim found under active policy, falling back to FIFO")]
    EvictionFallback,
}
