//! Error types for dataset-dl
//!
//! This module provides the error handling for the library, including:
//! - The main [`Error`] type with a [`Result`] alias
//! - Decode failures grouped under [`DecodeError`]
//! - A coarse [`ErrorClass`] taxonomy used by the run report (network, I/O, decode)
//! - Stable machine-readable error codes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dataset-dl
///
/// Each variant carries enough context to identify the failing source and stage when it
/// shows up in a log line or in the run report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "sources[0].url")
        key: Option<String>,
    },

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// URL that was requested
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content (JSON, CSV, spreadsheet, text encoding)
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Serialization error while writing structured output
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Content that could not be decoded into the shape a pipeline expects
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Response body or artifact is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(serde_json::Error),

    /// JSON parsed but does not have the expected top-level structure
    #[error("unexpected JSON structure: {reason}")]
    Structure {
        /// What was expected and what was found
        reason: String,
    },

    /// CSV content could not be parsed
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet could not be opened or has no readable worksheet
    #[error("cannot load spreadsheet {path}: {reason}")]
    Spreadsheet {
        /// Artifact that failed to load
        path: PathBuf,
        /// The reason loading failed
        reason: String,
    },

    /// Payload expected to be UTF-8 text is not
    #[error("content from {url} is not valid UTF-8: {reason}")]
    Utf8 {
        /// Where the content came from
        url: String,
        /// Decoder message
        reason: String,
    },
}

/// Coarse failure taxonomy reported per pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    /// Connection or HTTP status failure during fetch
    Network,
    /// Filesystem read or write failure
    Io,
    /// Malformed structured content
    Decode,
    /// Invalid configuration (never reached once a run has started)
    Config,
}

impl Error {
    /// Classify this error into the network / I/O / decode taxonomy
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Config { .. } => ErrorClass::Config,
            Error::Network(_) | Error::HttpStatus { .. } => ErrorClass::Network,
            Error::Io(_) | Error::Serialization(_) => ErrorClass::Io,
            Error::Decode(DecodeError::Csv(e)) if e.is_io_error() => ErrorClass::Io,
            Error::Decode(_) => ErrorClass::Decode,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Network(_) => "network_error",
            Error::HttpStatus { .. } => "http_status",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::Decode(e) => match e {
                DecodeError::Json(_) => "invalid_json",
                DecodeError::Structure { .. } => "unexpected_structure",
                DecodeError::Csv(_) => "invalid_csv",
                DecodeError::Spreadsheet { .. } => "invalid_spreadsheet",
                DecodeError::Utf8 { .. } => "invalid_utf8",
            },
        }
    }

    /// Shorthand for a configuration error tied to a key
    pub(crate) fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}
