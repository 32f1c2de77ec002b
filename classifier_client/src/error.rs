//! Error types for the classification client

use thiserror::Error;

/// Result alias used across the client library
pub type Result<T> = std::result::Result<T, Error>;

/// Local errors of the client.
///
/// Endpoint failures are not represented here: they are recorded as a
/// [`FailureReason`](crate::task::FailureReason) on the task that produced them.
#[derive(Error, Debug)]
pub enum Error {
    /// `submit` was called while no file is held
    #[error("No file selected")]
    NoFileSelected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the HTTP client failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
