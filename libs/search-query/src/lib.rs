//! Query compiler for the search gateway
//!
//! Pure functions that translate validated API parameters into the search
//! engine's JSON query DSL: pagination offsets, sort clauses, keyword-field
//! validation, `_source` selection, boolean filter assembly, facet
//! aggregations, and the scripted-field strategy for server-side
//! cross-reference truncation.
//!
//! Nothing in this crate performs I/O. All validation errors are raised
//! here, before any engine round-trip.

pub mod error;
pub mod facets;
pub mod keywords;
pub mod pagination;
pub mod query;
pub mod scripts;
pub mod sort;
pub mod source;

pub use error::{QueryError, Result};
pub use facets::{build_facet_aggs, FACET_AGG_SIZE};
pub use keywords::{parse_keywords, validate_keyword_fields, DEFAULT_KEYWORD_FIELDS};
pub use pagination::{exceeds_deep_paging, pagination_to_from_size, DEEP_PAGING_LIMIT};
pub use query::{build_search_query, KeywordOperator, SearchCriteria, Umbrella};
pub use scripts::{build_db_xrefs_script_fields, detail_search_body, merge_script_fields};
pub use sort::build_sort;
pub use source::build_source_filter;
