//! Per-type count endpoint (placeholder).

use axum::response::Response;

use crate::error::{Error, Result};

/// `GET /count/types/`: not yet wired to the query compiler.
pub async fn count_by_types() -> Result<Response> {
    Err(Error::NotImplemented)
}
