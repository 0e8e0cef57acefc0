//! API data model: database types and response shapes

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// One row of the static database-type table.
struct DbTypeInfo {
    name: &'static str,
    context_url: &'static str,
}

macro_rules! ctx {
    ($file:literal) => {
        concat!(
            "https://raw.githubusercontent.com/ddbj/ddbj-search-converter/main/ontology/",
            $file
        )
    };
}

/// Database types served by the gateway (12 types across 4 families).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    Bioproject,
    Biosample,
    SraSubmission,
    SraStudy,
    SraExperiment,
    SraRun,
    SraSample,
    SraAnalysis,
    JgaStudy,
    JgaDataset,
    JgaDac,
    JgaPolicy,
}

impl DbType {
    pub const ALL: [DbType; 12] = [
        DbType::Bioproject,
        DbType::Biosample,
        DbType::SraSubmission,
        DbType::SraStudy,
        DbType::SraExperiment,
        DbType::SraRun,
        DbType::SraSample,
        DbType::SraAnalysis,
        DbType::JgaStudy,
        DbType::JgaDataset,
        DbType::JgaDac,
        DbType::JgaPolicy,
    ];

    /// Static table: type name + linked-data context document.
    fn info(self) -> DbTypeInfo {
        match self {
            DbType::Bioproject => DbTypeInfo {
                name: "bioproject",
                context_url: ctx!("bioproject.jsonld"),
            },
            DbType::Biosample => DbTypeInfo {
                name: "biosample",
                context_url: ctx!("biosample.jsonld"),
            },
            DbType::SraSubmission => DbTypeInfo {
                name: "sra-submission",
                context_url: ctx!("sra.jsonld"),
            },
            DbType::SraStudy => DbTypeInfo {
                name: "sra-study",
                context_url: ctx!("sra.jsonld"),
            },
            DbType::SraExperiment => DbTypeInfo {
                name: "sra-experiment",
                context_url: ctx!("sra.jsonld"),
            },
            DbType::SraRun => DbTypeInfo {
                name: "sra-run",
                context_url: ctx!("sra.jsonld"),
            },
            DbType::SraSample => DbTypeInfo {
                name: "sra-sample",
                context_url: ctx!("sra.jsonld"),
            },
            DbType::SraAnalysis => DbTypeInfo {
                name: "sra-analysis",
                context_url: ctx!("sra.jsonld"),
            },
            DbType::JgaStudy => DbTypeInfo {
                name: "jga-study",
                context_url: ctx!("jga.jsonld"),
            },
            DbType::JgaDataset => DbTypeInfo {
                name: "jga-dataset",
                context_url: ctx!("jga.jsonld"),
            },
            DbType::JgaDac => DbTypeInfo {
                name: "jga-dac",
                context_url: ctx!("jga.jsonld"),
            },
            DbType::JgaPolicy => DbTypeInfo {
                name: "jga-policy",
                context_url: ctx!("jga.jsonld"),
            },
        }
    }

    /// Parse a path segment; unknown values surface as 404.
    pub fn from_path(raw: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == raw)
            .ok_or_else(|| crate::Error::UnknownDbType(raw.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        self.info().name
    }

    /// Engine index holding this type's documents.
    pub fn index(self) -> &'static str {
        self.info().name
    }

    /// `@context` document injected into JSON-LD responses.
    pub fn context_url(self) -> &'static str {
        self.info().context_url
    }

    /// Whether the project-scope extra filters and `objectType` facet apply.
    pub fn is_project_scope(self) -> bool {
        matches!(self, DbType::Bioproject)
    }
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// === Response shapes ===

/// Offset-based pagination metadata.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "perPage")]
    pub per_page: u32,
    pub total: u64,
}

/// A single bucket in a facet aggregation.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FacetBucket {
    pub value: String,
    pub count: u64,
}

/// Facet aggregation results.
///
/// The common facets are always present. `type` appears only for cross-type
/// searches, `objectType` only for the bioproject scope.
#[derive(Debug, Serialize)]
pub struct Facets {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub db_type: Option<Vec<FacetBucket>>,
    pub organism: Vec<FacetBucket>,
    pub status: Vec<FacetBucket>,
    pub accessibility: Vec<FacetBucket>,
    #[serde(rename = "objectType", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<Vec<FacetBucket>>,
}

/// Search result list with pagination and optional facets.
///
/// Items are summary projections of engine documents; their field sets vary
/// by database type, so they stay schemaless here (the document schemas are
/// owned by the converter pipeline, not this gateway).
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub pagination: Pagination,
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
}

/// Response for the facet endpoints.
#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub facets: Facets,
}

/// Response for `GET /service-info`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// RFC 7807 Problem Details error body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub timestamp: String,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ProblemDetails {
    pub fn new(status: u16, title: &'static str, detail: String) -> Self {
        Self {
            problem_type: "about:blank",
            title,
            status,
            detail,
            instance: None,
            timestamp: Utc::now().to_rfc3339(),
            request_id: None,
        }
    }
}
