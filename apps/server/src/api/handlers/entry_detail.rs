//! Entry detail handlers.
//!
//! - `GET /entries/{type}/{id}`: frontend detail (truncated dbXrefs + counts)
//! - `GET/POST /entries/{type}/{id}.json`: raw engine document (streaming)
//! - `GET/POST /entries/{type}/{id}.jsonld`: JSON-LD (streaming injection)
//! - `GET /entries/{type}/{id}/dbxrefs.json`: full dbXrefs (streaming)
//!
//! Path captures are whole segments, so the `.json`/`.jsonld` variants are
//! dispatched on the identifier suffix inside the shared handler.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::extractors::ApiQuery;
use crate::api::params::{check_db_xrefs_limit, DetailQuery};
use crate::error::{Error, Result};
use crate::models::DbType;
use crate::services::search;
use crate::state::AppState;
use crate::streaming::inject_jsonld;

/// `GET /entries/{type}/{id}[.json|.jsonld]`: dispatch on the suffix.
pub async fn entry_by_id(
    State(state): State<AppState>,
    Path((db_type, id)): Path<(String, String)>,
    method: Method,
    ApiQuery(q): ApiQuery<DetailQuery>,
) -> Result<Response> {
    let db_type = DbType::from_path(&db_type)?;

    if let Some(id) = id.strip_suffix(".jsonld") {
        return entry_jsonld(&state, db_type, id).await;
    }
    if let Some(id) = id.strip_suffix(".json") {
        return entry_raw(&state, db_type, id).await;
    }
    if method == Method::POST {
        return Err(Error::MethodNotAllowed(
            "POST is only supported for the .json and .jsonld variants.".to_string(),
        ));
    }

    check_db_xrefs_limit(q.db_xrefs_limit)?;
    let source = search::fetch_entry_detail(&state.es, db_type.index(), &id, q.db_xrefs_limit)
        .await?
        .ok_or(Error::NotFound)?;

    Ok(Json(source).into_response())
}

/// Raw engine document, forwarded byte for byte.
async fn entry_raw(state: &AppState, db_type: DbType, id: &str) -> Result<Response> {
    let stream = state
        .es
        .get_source_stream(db_type.index(), id, None)
        .await?
        .ok_or(Error::NotFound)?;

    stream_response(
        Body::from_stream(stream.into_bytes_stream()),
        "application/json",
    )
}

/// Document with `@context`/`@id` spliced into the byte stream.
async fn entry_jsonld(state: &AppState, db_type: DbType, id: &str) -> Result<Response> {
    let stream = state
        .es
        .get_source_stream(db_type.index(), id, None)
        .await?
        .ok_or(Error::NotFound)?;

    let at_id = format!(
        "{}/entries/{}/{}",
        state.config.server.base_url, db_type, id
    );
    let body = Body::from_stream(inject_jsonld(
        stream.into_bytes_stream(),
        db_type.context_url(),
        &at_id,
    ));

    stream_response(body, "application/ld+json")
}

/// `GET /entries/{type}/{id}/dbxrefs.json`: the full cross-reference
/// array in one streamed response.
pub async fn dbxrefs_full(
    State(state): State<AppState>,
    Path((db_type, id)): Path<(String, String)>,
) -> Result<Response> {
    let db_type = DbType::from_path(&db_type)?;

    let stream = state
        .es
        .get_source_stream(db_type.index(), &id, Some("dbXrefs"))
        .await?
        .ok_or(Error::NotFound)?;

    stream_response(
        Body::from_stream(stream.into_bytes_stream()),
        "application/json",
    )
}

fn stream_response(body: Body, content_type: &'static str) -> Result<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(body)
        .map_err(|e| Error::Other(e.into()))
}
