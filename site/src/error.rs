//! Error types for the page client.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or a body that could not be decoded
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
