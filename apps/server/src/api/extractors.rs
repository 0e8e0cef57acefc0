//! Custom Axum extractors whose rejections are problem-details responses.
//!
//! The stock `Query`/`Json` extractors reject with plain-text bodies; these
//! wrappers surface extraction failures through [`Error`] so every error
//! the API emits has the same RFC 7807 shape.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Query-string extractor rejecting with a 422 problem response.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        serde_urlencoded::from_str(query)
            .map(ApiQuery)
            .map_err(|e| Error::Validation(format!("Invalid query parameters: {e}")))
    }
}

/// JSON body extractor rejecting with a 422 problem response.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(format!("Invalid request body: {e}")))?;

        Ok(ApiJson(value))
    }
}
