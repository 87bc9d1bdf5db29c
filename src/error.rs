//! Error handling for the portsweep scanner
//!
//! Per-probe network failures (refused connections, timeouts, unreachable
//! hosts) are never surfaced through this type; each probe maps them to a
//! port status so one failing port cannot abort the rest of a scan.

use thiserror::Error;

/// Main error type for scanning operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Port spec error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
