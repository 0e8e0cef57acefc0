//! Search API routes
//!
//! Route registration order matters where static and captured segments
//! overlap: static segments (`bulk`, `dbxrefs.json`) take precedence over
//! the `{id}` capture. Trailing-slash twins are registered explicitly;
//! both forms are served directly, no redirects.

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers::{bulk, count, entries, entry_detail, facets, service_info};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Service info
        .route("/service-info", get(service_info::service_info))
        .route("/service-info/", get(service_info::service_info))
        // Per-type counts (placeholder)
        .route("/count/types", get(count::count_by_types))
        .route("/count/types/", get(count::count_by_types))
        // Cross-type search
        .route("/entries", get(entries::list_all_entries))
        .route("/entries/", get(entries::list_all_entries))
        // Per-type search
        .route("/entries/:db_type", get(entries::list_type_entries))
        .route("/entries/:db_type/", get(entries::list_type_entries))
        // Bulk retrieval (static segment, before the {id} capture)
        .route(
            "/entries/:db_type/bulk",
            post(bulk::bulk_entries_post).get(bulk::bulk_entries_get),
        )
        .route(
            "/entries/:db_type/bulk/",
            post(bulk::bulk_entries_post).get(bulk::bulk_entries_get),
        )
        // Entry detail; `.json`/`.jsonld` variants dispatch on the suffix
        .route(
            "/entries/:db_type/:id",
            get(entry_detail::entry_by_id).post(entry_detail::entry_by_id),
        )
        .route(
            "/entries/:db_type/:id/dbxrefs.json",
            get(entry_detail::dbxrefs_full),
        )
        // Facets
        .route("/facets", get(facets::all_facets))
        .route("/facets/", get(facets::all_facets))
        .route("/facets/:db_type", get(facets::type_facets))
        .route("/facets/:db_type/", get(facets::type_facets))
}
