//! Byte-stream pipelines: linked-data injection and bulk assembly

pub mod bulk;
pub mod jsonld;

pub use bulk::{bulk_json_stream, bulk_ndjson_stream};
pub use jsonld::{inject_jsonld, JsonLdInjector};
