//! Search engine HTTP client
//!
//! Thin async wrapper over the engine's REST query API: `_search`,
//! `_count`, and streamed `_source` retrieval. The client owns no query
//! semantics (request bodies are compiled elsewhere) and applies no
//! retries, timeouts, or backoff: a failed call surfaces immediately and
//! retry policy belongs to the caller's transport configuration.

pub mod client;
pub mod error;

pub use client::{EsClient, SourceStream};
pub use error::{Error, Result};
