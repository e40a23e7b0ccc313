//! Error handling and custom error types
//!
//! Provides unified error handling across the client using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request could not complete (connect, send, or body decode).
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status} {reason}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Status line shown to the user, e.g. `Error: 502 Bad Gateway`.
    pub fn status_message(&self) -> String {
        match self {
            Error::HttpStatus { status, reason, .. } => format!("Error: {} {}", status, reason),
            other => format!("Network/Server error: {}", other),
        }
    }
}
