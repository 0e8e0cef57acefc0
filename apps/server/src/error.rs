//! Error types for the search gateway

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ProblemDetails;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Deep paging limit exceeded: page ({page}) * perPage ({per_page}) = {product} > {limit}. \
         Use the Bulk API for large result sets."
    )]
    DeepPagingExceeded {
        page: u32,
        per_page: u32,
        product: u64,
        limit: u64,
    },

    #[error(transparent)]
    InvalidQuery(#[from] quaero_query::QueryError),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown database type: '{0}'")]
    UnknownDbType(String),

    #[error("Not Found")]
    NotFound,

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Search engine request failed: {0}")]
    Upstream(#[from] quaero_es::Error),

    #[error("This endpoint is not yet implemented.")]
    NotImplemented,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Error::DeepPagingExceeded { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::InvalidQuery(_) | Error::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Error::UnknownDbType(_) | Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            Error::Upstream(_) => {
                tracing::error!(error = %self, "Upstream search engine failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Search engine request failed.".to_string(),
                )
            }
            Error::NotImplemented => (StatusCode::NOT_IMPLEMENTED, self.to_string()),
            Error::Other(_) => {
                tracing::error!(error = %self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = ProblemDetails::new(status.as_u16(), status_title(status), detail);
        let mut response = (status, Json(body)).into_response();

        // RFC 7807 media type on every error body.
        // (instance/requestId need request context, which IntoResponse does
        // not have; the X-Request-ID response header covers correlation.)
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}

fn status_title(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::METHOD_NOT_ALLOWED => "Method Not Allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Entity",
        StatusCode::BAD_GATEWAY => "Bad Gateway",
        StatusCode::NOT_IMPLEMENTED => "Not Implemented",
        _ => "Internal Server Error",
    }
}
