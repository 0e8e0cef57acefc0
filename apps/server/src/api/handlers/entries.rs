//! Entry search handlers: cross-type and per-type list endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::extractors::ApiQuery;
use crate::api::params::{parse_umbrella, EntriesQuery, ProjectFilters};
use crate::error::Result;
use crate::models::{DbType, EntryListResponse};
use crate::services::search::{self, SearchScope};
use crate::state::AppState;

/// `GET /entries/`: search across all database types.
///
/// Supports keyword search, organism/date filtering, pagination, sorting,
/// field selection, and facet aggregation. The `types` parameter narrows
/// the search to specific database types.
pub async fn list_all_entries(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<EntriesQuery>,
) -> Result<Json<EntryListResponse>> {
    let response = search::execute_entry_search(
        &state.es,
        SearchScope::cross_type(),
        &q,
        q.types.as_deref(),
        None,
    )
    .await?;

    Ok(Json(response))
}

/// `GET /entries/{type}/`: search a single database type.
///
/// The bioproject scope additionally honors the organization, publication,
/// grant, and umbrella filters.
pub async fn list_type_entries(
    State(state): State<AppState>,
    Path(db_type): Path<String>,
    ApiQuery(q): ApiQuery<EntriesQuery>,
) -> Result<Json<EntryListResponse>> {
    let db_type = DbType::from_path(&db_type)?;
    let project = project_filters(db_type, &q)?;

    let response = search::execute_entry_search(
        &state.es,
        SearchScope::for_type(db_type.as_str()),
        &q,
        None,
        project.as_ref(),
    )
    .await?;

    Ok(Json(response))
}

fn project_filters(db_type: DbType, q: &EntriesQuery) -> Result<Option<ProjectFilters<'_>>> {
    if !db_type.is_project_scope() {
        return Ok(None);
    }

    Ok(Some(ProjectFilters {
        organization: q.organization.as_deref(),
        publication: q.publication.as_deref(),
        grant: q.grant.as_deref(),
        umbrella: parse_umbrella(q.umbrella.as_deref())?,
    }))
}
