//! Error types for the query compiler

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, QueryError>;

/// Parameter validation errors.
///
/// Every variant carries the offending value and, where useful, the allowed
/// set, so the API layer can surface the message verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid sort format: '{value}'. Expected '{{field}}:{{direction}}'.")]
    InvalidSortFormat { value: String },

    #[error("Invalid sort field: '{field}'. Allowed: {allowed}.")]
    InvalidSortField { field: String, allowed: String },

    #[error("Invalid sort direction: '{direction}'. Allowed: asc, desc.")]
    InvalidSortDirection { direction: String },

    #[error("Invalid keywordFields: empty value. Allowed: {allowed}.")]
    EmptyKeywordFields { allowed: String },

    #[error("Invalid keywordFields: {fields}. Allowed: {allowed}.")]
    InvalidKeywordFields { fields: String, allowed: String },
}
