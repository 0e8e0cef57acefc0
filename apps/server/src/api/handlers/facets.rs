//! Facet count handlers: aggregation buckets without search results.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::extractors::ApiQuery;
use crate::api::params::{parse_umbrella, FacetsQuery, ProjectFilters};
use crate::error::Result;
use crate::models::{DbType, FacetsResponse};
use crate::services::search::{self, SearchScope};
use crate::state::AppState;

/// `GET /facets`: facet counts across all database types.
///
/// Search filter parameters narrow the set of entries the facets are
/// computed over.
pub async fn all_facets(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<FacetsQuery>,
) -> Result<Json<FacetsResponse>> {
    let response = search::execute_facet_search(
        &state.es,
        SearchScope::cross_type(),
        &q,
        q.types.as_deref(),
        None,
    )
    .await?;

    Ok(Json(response))
}

/// `GET /facets/{type}`: facet counts for a single database type.
pub async fn type_facets(
    State(state): State<AppState>,
    Path(db_type): Path<String>,
    ApiQuery(q): ApiQuery<FacetsQuery>,
) -> Result<Json<FacetsResponse>> {
    let db_type = DbType::from_path(&db_type)?;
    let project = project_filters(db_type, &q)?;

    let response = search::execute_facet_search(
        &state.es,
        SearchScope::for_type(db_type.as_str()),
        &q,
        None,
        project.as_ref(),
    )
    .await?;

    Ok(Json(response))
}

fn project_filters(db_type: DbType, q: &FacetsQuery) -> Result<Option<ProjectFilters<'_>>> {
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
