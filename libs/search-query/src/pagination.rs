//! Page/perPage to engine from/size conversion.

/// Maximum allowed `page * perPage` product. Requests beyond this are
/// rejected before reaching the engine; the bulk API covers large exports.
pub const DEEP_PAGING_LIMIT: u64 = 10_000;

/// Convert 1-based page/perPage to engine from/size.
///
/// No clamping: callers validate `page >= 1` and `perPage` bounds upstream.
pub fn pagination_to_from_size(page: u32, per_page: u32) -> (u32, u32) {
    ((page - 1) * per_page, per_page)
}

/// Whether a page/perPage combination exceeds [`DEEP_PAGING_LIMIT`].
pub fn exceeds_deep_paging(page: u32, per_page: u32) -> bool {
    u64::from(page) * u64::from(per_page) > DEEP_PAGING_LIMIT
}
