//! Errors raised while building tail URLs or opening connections

use thiserror::Error;

/// Errors that can occur in the log tailing core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TailError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Unsupported scheme '{0}' (expected http, https, ws or wss)")]
    UnsupportedScheme(String),

    #[error("Failed to open log stream: {0}")]
    Transport(String),
}
