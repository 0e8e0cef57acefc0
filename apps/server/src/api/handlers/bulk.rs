//! Bulk retrieval handlers: up to 1000 entries per request.
//!
//! `POST /entries/{type}/bulk` takes `{"ids":[...]}` in the body; the GET
//! variant takes `?ids=` comma-separated. `format=json` answers with an
//! entries/notFound envelope, `format=ndjson` with one document per line
//! (not-found IDs produce no line). Input order is preserved and repeated
//! identifiers are fetched repeatedly; callers own deduplication.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};

use crate::api::extractors::{ApiJson, ApiQuery};
use crate::api::params::{BulkFormat, BulkParams, BulkRequest, BULK_MAX_IDS};
use crate::error::{Error, Result};
use crate::models::DbType;
use crate::state::AppState;
use crate::streaming::{bulk_json_stream, bulk_ndjson_stream};

/// `POST /entries/{type}/bulk`
pub async fn bulk_entries_post(
    State(state): State<AppState>,
    Path(db_type): Path<String>,
    ApiQuery(params): ApiQuery<BulkParams>,
    ApiJson(body): ApiJson<BulkRequest>,
) -> Result<Response> {
    let db_type = DbType::from_path(&db_type)?;

    bulk_response(&state, db_type, body.ids, params.format)
}

/// `GET /entries/{type}/bulk?ids=...`: comma-separated identifiers.
pub async fn bulk_entries_get(
    State(state): State<AppState>,
    Path(db_type): Path<String>,
    ApiQuery(params): ApiQuery<BulkParams>,
) -> Result<Response> {
    let db_type = DbType::from_path(&db_type)?;
    let raw = params
        .ids
        .as_deref()
        .ok_or_else(|| Error::Validation("ids parameter is required.".to_string()))?;
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();

    bulk_response(&state, db_type, ids, params.format)
}

fn bulk_response(
    state: &AppState,
    db_type: DbType,
    ids: Vec<String>,
    format: BulkFormat,
) -> Result<Response> {
    if ids.len() > BULK_MAX_IDS {
        return Err(Error::Validation(format!(
            "Too many ids: {} (maximum {BULK_MAX_IDS}).",
            ids.len()
        )));
    }

    tracing::debug!(
        db_type = %db_type,
        id_count = ids.len(),
        ?format,
        "Starting bulk retrieval"
    );

    let es = state.es.clone();
    let index = db_type.index().to_string();
    let (body, content_type) = match format {
        BulkFormat::Json => (
            Body::from_stream(bulk_json_stream(es, index, ids)),
            "application/json",
        ),
        BulkFormat::Ndjson => (
            Body::from_stream(bulk_ndjson_stream(es, index, ids)),
            "application/x-ndjson",
        ),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(body)
        .map_err(|e| Error::Other(e.into()))
}
