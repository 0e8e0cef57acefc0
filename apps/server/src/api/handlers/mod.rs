//! Request handlers for the search API

pub mod bulk;
pub mod count;
pub mod entries;
pub mod entry_detail;
pub mod facets;
pub mod service_info;
