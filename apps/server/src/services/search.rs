//! Search execution: compile parameters, run the engine query, reshape.

use serde_json::{json, Value};

use quaero_es::EsClient;
use quaero_query::{
    build_facet_aggs, build_search_query, build_sort, build_source_filter, detail_search_body,
    exceeds_deep_paging, merge_script_fields, pagination_to_from_size, validate_keyword_fields,
    SearchCriteria, DEEP_PAGING_LIMIT,
};

use crate::api::params::{EntriesQuery, FacetsQuery, ProjectFilters};
use crate::error::{Error, Result};
use crate::models::{EntryListResponse, FacetsResponse, Pagination};
use crate::services::reshape;

/// Which index a search runs against and how its facets are shaped.
#[derive(Debug, Clone, Copy)]
pub struct SearchScope<'a> {
    pub index: &'a str,
    pub is_cross_type: bool,
    pub db_type: Option<&'a str>,
}

impl<'a> SearchScope<'a> {
    /// The cross-type scope searches the combined `entries` index.
    pub fn cross_type() -> Self {
        Self {
            index: "entries",
            is_cross_type: true,
            db_type: None,
        }
    }

    pub fn for_type(db_type: &'a str) -> Self {
        Self {
            index: db_type,
            is_cross_type: false,
            db_type: Some(db_type),
        }
    }
}

/// Execute an entry search and build the list response.
///
/// All parameter validation happens before the engine round-trip.
pub async fn execute_entry_search(
    es: &EsClient,
    scope: SearchScope<'_>,
    q: &EntriesQuery,
    types: Option<&str>,
    project: Option<&ProjectFilters<'_>>,
) -> Result<EntryListResponse> {
    q.validate_bounds()?;
    if exceeds_deep_paging(q.page, q.per_page) {
        return Err(Error::DeepPagingExceeded {
            page: q.page,
            per_page: q.per_page,
            product: u64::from(q.page) * u64::from(q.per_page),
            limit: DEEP_PAGING_LIMIT,
        });
    }
    let sort = build_sort(q.sort.as_deref())?;
    let keyword_fields = validate_keyword_fields(q.keyword_fields.as_deref())?;

    let query = build_search_query(&SearchCriteria {
        keywords: q.keywords.as_deref(),
        keyword_fields: Some(&keyword_fields),
        keyword_operator: q.keyword_operator.into(),
        organism: q.organism.as_deref(),
        date_published_from: q.date_published_from.as_deref(),
        date_published_to: q.date_published_to.as_deref(),
        date_modified_from: q.date_modified_from.as_deref(),
        date_modified_to: q.date_modified_to.as_deref(),
        types,
        organization: project.and_then(|p| p.organization),
        publication: project.and_then(|p| p.publication),
        grant: project.and_then(|p| p.grant),
        umbrella: project.and_then(|p| p.umbrella),
    });

    let (from, size) = pagination_to_from_size(q.page, q.per_page);
    let mut body = json!({
        "query": query,
        "from": from,
        "size": size,
    });
    if let Some(sort) = sort {
        body["sort"] = sort;
    }
    if let Some(source) = build_source_filter(q.fields.as_deref(), q.include_properties) {
        body["_source"] = source;
    }
    if q.include_facets {
        body["aggs"] = build_facet_aggs(scope.is_cross_type, scope.db_type);
    }

    tracing::debug!(index = scope.index, "Executing entry search");
    let response = es.search(scope.index, body).await?;

    let hits = engine_hits(&response)?;
    let total = response
        .pointer("/hits/total/value")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::Other(anyhow::anyhow!("engine response missing hits.total")))?;

    let items = reshape::parse_hits(hits, q.db_xrefs_limit);
    let facets = if q.include_facets {
        response
            .get("aggregations")
            .map(|aggs| reshape::parse_facets(aggs, scope.is_cross_type, scope.db_type))
    } else {
        None
    };

    Ok(EntryListResponse {
        pagination: Pagination {
            page: q.page,
            per_page: q.per_page,
            total,
        },
        items,
        facets,
    })
}

/// Execute a facet-only aggregation (`size: 0`).
pub async fn execute_facet_search(
    es: &EsClient,
    scope: SearchScope<'_>,
    q: &FacetsQuery,
    types: Option<&str>,
    project: Option<&ProjectFilters<'_>>,
) -> Result<FacetsResponse> {
    q.validate_bounds()?;
    let keyword_fields = validate_keyword_fields(q.keyword_fields.as_deref())?;

    let query = build_search_query(&SearchCriteria {
        keywords: q.keywords.as_deref(),
        keyword_fields: Some(&keyword_fields),
        keyword_operator: q.keyword_operator.into(),
        organism: q.organism.as_deref(),
        date_published_from: q.date_published_from.as_deref(),
        date_published_to: q.date_published_to.as_deref(),
        date_modified_from: q.date_modified_from.as_deref(),
        date_modified_to: q.date_modified_to.as_deref(),
        types,
        organization: project.and_then(|p| p.organization),
        publication: project.and_then(|p| p.publication),
        grant: project.and_then(|p| p.grant),
        umbrella: project.and_then(|p| p.umbrella),
    });

    let body = json!({
        "query": query,
        "size": 0,
        "aggs": build_facet_aggs(scope.is_cross_type, scope.db_type),
    });

    tracing::debug!(index = scope.index, "Executing facet aggregation");
    let response = es.search(scope.index, body).await?;

    let empty = json!({});
    let aggregations = response.get("aggregations").unwrap_or(&empty);

    Ok(FacetsResponse {
        facets: reshape::parse_facets(aggregations, scope.is_cross_type, scope.db_type),
    })
}

/// Fetch a single entry with engine-side cross-reference truncation.
///
/// Returns `None` when the engine reports zero matches for the identifier.
pub async fn fetch_entry_detail(
    es: &EsClient,
    index: &str,
    id: &str,
    db_xrefs_limit: usize,
) -> Result<Option<Value>> {
    let body = detail_search_body(id, db_xrefs_limit);
    let response = es.search(index, body).await?;
    let hits = engine_hits(&response)?;

    Ok(hits.first().map(merge_script_fields))
}

fn engine_hits(response: &Value) -> Result<&Vec<Value>> {
    response
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Other(anyhow::anyhow!("engine response missing hits")))
}
