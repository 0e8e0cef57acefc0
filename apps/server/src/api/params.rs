//! Query-parameter bundles for the API endpoints.
//!
//! Deserialization is permissive (unknown parameters are ignored, matching
//! the API contract); bounds and format checks live in the `validate`
//! methods and are always run before any engine call.

use chrono::NaiveDate;
use serde::Deserialize;

use quaero_query::{KeywordOperator, Umbrella};

use crate::error::{Error, Result};

pub const PER_PAGE_MAX: u32 = 100;
pub const DB_XREFS_LIMIT_MAX: usize = 1000;
/// Hard cap on bulk request size.
pub const BULK_MAX_IDS: usize = 1000;

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    10
}
fn default_true() -> bool {
    true
}
fn default_db_xrefs_limit() -> usize {
    100
}

/// Keyword operator as it appears on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum KeywordOperatorParam {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl From<KeywordOperatorParam> for KeywordOperator {
    fn from(value: KeywordOperatorParam) -> Self {
        match value {
            KeywordOperatorParam::And => KeywordOperator::And,
            KeywordOperatorParam::Or => KeywordOperator::Or,
        }
    }
}

/// Bulk output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BulkFormat {
    #[default]
    Json,
    Ndjson,
}

/// Parameters for the entry search endpoints.
#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page", rename = "perPage")]
    pub per_page: u32,

    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default, rename = "keywordFields")]
    pub keyword_fields: Option<String>,
    #[serde(default, rename = "keywordOperator")]
    pub keyword_operator: KeywordOperatorParam,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default, rename = "datePublishedFrom")]
    pub date_published_from: Option<String>,
    #[serde(default, rename = "datePublishedTo")]
    pub date_published_to: Option<String>,
    #[serde(default, rename = "dateModifiedFrom")]
    pub date_modified_from: Option<String>,
    #[serde(default, rename = "dateModifiedTo")]
    pub date_modified_to: Option<String>,

    /// Cross-type search only: restrict to specific database types.
    #[serde(default)]
    pub types: Option<String>,

    // Bioproject-scope filters; ignored elsewhere.
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub publication: Option<String>,
    #[serde(default)]
    pub grant: Option<String>,
    #[serde(default)]
    pub umbrella: Option<String>,

    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub fields: Option<String>,
    #[serde(default = "default_true", rename = "includeProperties")]
    pub include_properties: bool,
    #[serde(default, rename = "includeFacets")]
    pub include_facets: bool,
    #[serde(default = "default_db_xrefs_limit", rename = "dbXrefsLimit")]
    pub db_xrefs_limit: usize,
}

impl EntriesQuery {
    /// Bounds and format checks (everything except sort/keywordFields,
    /// which the query compiler validates).
    pub fn validate_bounds(&self) -> Result<()> {
        if self.page < 1 {
            return Err(Error::Validation("page must be >= 1.".to_string()));
        }
        if !(1..=PER_PAGE_MAX).contains(&self.per_page) {
            return Err(Error::Validation(format!(
                "perPage must be between 1 and {PER_PAGE_MAX}."
            )));
        }
        check_db_xrefs_limit(self.db_xrefs_limit)?;
        check_date("datePublishedFrom", self.date_published_from.as_deref())?;
        check_date("datePublishedTo", self.date_published_to.as_deref())?;
        check_date("dateModifiedFrom", self.date_modified_from.as_deref())?;
        check_date("dateModifiedTo", self.date_modified_to.as_deref())?;
        Ok(())
    }
}

/// Parameters for the facet endpoints (filters only, no pagination).
#[derive(Debug, Deserialize)]
pub struct FacetsQuery {
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default, rename = "keywordFields")]
    pub keyword_fields: Option<String>,
    #[serde(default, rename = "keywordOperator")]
    pub keyword_operator: KeywordOperatorParam,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default, rename = "datePublishedFrom")]
    pub date_published_from: Option<String>,
    #[serde(default, rename = "datePublishedTo")]
    pub date_published_to: Option<String>,
    #[serde(default, rename = "dateModifiedFrom")]
    pub date_modified_from: Option<String>,
    #[serde(default, rename = "dateModifiedTo")]
    pub date_modified_to: Option<String>,
    #[serde(default)]
    pub types: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub publication: Option<String>,
    #[serde(default)]
    pub grant: Option<String>,
    #[serde(default)]
    pub umbrella: Option<String>,
}

impl FacetsQuery {
    pub fn validate_bounds(&self) -> Result<()> {
        check_date("datePublishedFrom", self.date_published_from.as_deref())?;
        check_date("datePublishedTo", self.date_published_to.as_deref())?;
        check_date("dateModifiedFrom", self.date_modified_from.as_deref())?;
        check_date("dateModifiedTo", self.date_modified_to.as_deref())?;
        Ok(())
    }
}

/// Parameters for the entry detail endpoint.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(default = "default_db_xrefs_limit", rename = "dbXrefsLimit")]
    pub db_xrefs_limit: usize,
}

/// Query parameters for the bulk endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkParams {
    #[serde(default)]
    pub format: BulkFormat,
    /// GET variant: comma-separated entry identifiers.
    #[serde(default)]
    pub ids: Option<String>,
}

/// Request body for the bulk POST endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub ids: Vec<String>,
}

/// Validated bioproject-scope filters.
#[derive(Debug, Default)]
pub struct ProjectFilters<'a> {
    pub organization: Option<&'a str>,
    pub publication: Option<&'a str>,
    pub grant: Option<&'a str>,
    pub umbrella: Option<Umbrella>,
}

/// Parse the umbrella parameter: TRUE or FALSE, case-insensitive.
pub fn parse_umbrella(raw: Option<&str>) -> Result<Option<Umbrella>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(Some(Umbrella::True)),
        "FALSE" => Ok(Some(Umbrella::False)),
        _ => Err(Error::Validation(
            "Invalid umbrella value: must be TRUE or FALSE (case-insensitive).".to_string(),
        )),
    }
}

pub fn check_db_xrefs_limit(limit: usize) -> Result<()> {
    if limit > DB_XREFS_LIMIT_MAX {
        return Err(Error::Validation(format!(
            "dbXrefsLimit must be between 0 and {DB_XREFS_LIMIT_MAX}."
        )));
    }
    Ok(())
}

fn check_date(name: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            Error::Validation(format!(
                "Invalid {name}: '{value}'. Expected 'YYYY-MM-DD'."
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries_query(raw: &str) -> EntriesQuery {
        serde_urlencoded::from_str(raw).unwrap()
    }

    #[test]
    fn defaults_match_api_contract() {
        let q = entries_query("");
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 10);
        assert_eq!(q.keyword_operator, KeywordOperatorParam::And);
        assert!(q.include_properties);
        assert!(!q.include_facets);
        assert_eq!(q.db_xrefs_limit, 100);
    }

    #[test]
    fn camel_case_aliases_deserialize() {
        let q = entries_query(
            "perPage=50&keywordFields=title&keywordOperator=OR&includeFacets=true&dbXrefsLimit=0",
        );
        assert_eq!(q.per_page, 50);
        assert_eq!(q.keyword_fields.as_deref(), Some("title"));
        assert_eq!(q.keyword_operator, KeywordOperatorParam::Or);
        assert!(q.include_facets);
        assert_eq!(q.db_xrefs_limit, 0);
    }

    #[test]
    fn bounds_are_enforced() {
        assert!(entries_query("page=0").validate_bounds().is_err());
        assert!(entries_query("perPage=0").validate_bounds().is_err());
        assert!(entries_query("perPage=101").validate_bounds().is_err());
        assert!(entries_query("dbXrefsLimit=1001").validate_bounds().is_err());
        assert!(entries_query("perPage=100").validate_bounds().is_ok());
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(entries_query("datePublishedFrom=2020-01-01")
            .validate_bounds()
            .is_ok());
        assert!(entries_query("datePublishedFrom=01/02/2020")
            .validate_bounds()
            .is_err());
        assert!(entries_query("dateModifiedTo=2020-13-01")
            .validate_bounds()
            .is_err());
    }

    #[test]
    fn umbrella_is_case_insensitive() {
        assert_eq!(parse_umbrella(Some("true")).unwrap(), Some(Umbrella::True));
        assert_eq!(parse_umbrella(Some("FALSE")).unwrap(), Some(Umbrella::False));
        assert_eq!(parse_umbrella(None).unwrap(), None);
        assert!(parse_umbrella(Some("maybe")).is_err());
    }
}
