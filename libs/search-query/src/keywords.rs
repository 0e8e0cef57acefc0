//! Keyword parsing and keyword-field allow-list validation.

use crate::error::{QueryError, Result};

/// Fields searched by default; also the complete allow-list for
/// `keywordFields`.
pub const DEFAULT_KEYWORD_FIELDS: [&str; 4] = ["identifier", "title", "name", "description"];

fn allowed_keyword_fields() -> String {
    let mut fields = DEFAULT_KEYWORD_FIELDS.to_vec();
    fields.sort_unstable();
    fields.join(", ")
}

/// Validate and parse the comma-separated `keywordFields` parameter.
///
/// `None` yields the full default field set. Empty input and any field
/// outside the allow-list are rejected.
pub fn validate_keyword_fields(raw: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_KEYWORD_FIELDS.iter().map(|f| f.to_string()).collect());
    };

    let fields: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    if fields.is_empty() {
        return Err(QueryError::EmptyKeywordFields {
            allowed: allowed_keyword_fields(),
        });
    }

    let invalid: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| !DEFAULT_KEYWORD_FIELDS.contains(f))
        .collect();
    if !invalid.is_empty() {
        return Err(QueryError::InvalidKeywordFields {
            fields: invalid.join(", "),
            allowed: allowed_keyword_fields(),
        });
    }

    Ok(fields.into_iter().map(String::from).collect())
}

/// Split comma-separated keywords, trimming whitespace and dropping empties.
pub fn parse_keywords(keywords: Option<&str>) -> Vec<String> {
    keywords
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
