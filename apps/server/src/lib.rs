//! Search gateway for biological-database records
//!
//! A query-translation and response-streaming gateway between a REST API
//! and a document search engine holding bioproject, biosample, SRA, and JGA
//! entries:
//! - Paginated, filterable entry search with facet aggregation
//! - Single-entry detail with engine-side cross-reference truncation
//! - Streamed raw and linked-data (JSON-LD) document retrieval
//! - Bulk multi-ID retrieval with bounded memory

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;
pub mod streaming;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
