//! Per-request context made available via request extensions.

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
}
