//! Error types for the engine client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Engine client errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid engine URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Engine URL cannot be used as a base: {0}")]
    NotABaseUrl(String),

    #[error("Engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed engine response: missing {0}")]
    MalformedResponse(&'static str),
}
