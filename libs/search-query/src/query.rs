//! Boolean search query assembly.

use serde_json::{json, Map, Value};

use crate::keywords::{parse_keywords, DEFAULT_KEYWORD_FIELDS};

/// Boolean operator combining multiple keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeywordOperator {
    #[default]
    And,
    Or,
}

/// Umbrella-project filter for the bioproject scope.
///
/// Maps onto the engine's `objectType` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Umbrella {
    True,
    False,
}

impl Umbrella {
    fn object_type(self) -> &'static str {
        match self {
            Umbrella::True => "UmbrellaBioProject",
            Umbrella::False => "BioProject",
        }
    }
}

/// Validated inputs to [`build_search_query`].
///
/// `keyword_fields` holds the pre-validated field set
/// ([`crate::validate_keyword_fields`]); `None` falls back to the defaults.
#[derive(Debug, Default, Clone)]
pub struct SearchCriteria<'a> {
    pub keywords: Option<&'a str>,
    pub keyword_fields: Option<&'a [String]>,
    pub keyword_operator: KeywordOperator,
    pub organism: Option<&'a str>,
    pub date_published_from: Option<&'a str>,
    pub date_published_to: Option<&'a str>,
    pub date_modified_from: Option<&'a str>,
    pub date_modified_to: Option<&'a str>,
    pub types: Option<&'a str>,
    pub organization: Option<&'a str>,
    pub publication: Option<&'a str>,
    pub grant: Option<&'a str>,
    pub umbrella: Option<Umbrella>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Build the engine query expression for a search request.
///
/// Keywords become one phrase-match clause per comma-separated term; `AND`
/// places the clauses in a `must` list, `OR` in a `should` list with
/// `minimum_should_match: 1`. Filter clauses never affect relevance
/// scoring. No keywords and no filters compiles to match-everything.
pub fn build_search_query(criteria: &SearchCriteria) -> Value {
    let keyword_list = parse_keywords(criteria.keywords);
    let filters = build_filter_clauses(criteria);

    if keyword_list.is_empty() && filters.is_empty() {
        return json!({ "match_all": {} });
    }

    let default_fields: Vec<String>;
    let fields: &[String] = match criteria.keyword_fields {
        Some(fields) => fields,
        None => {
            default_fields = DEFAULT_KEYWORD_FIELDS.iter().map(|f| f.to_string()).collect();
            &default_fields
        }
    };

    let mut bool_query = Map::new();

    if !keyword_list.is_empty() {
        let multi_matches: Vec<Value> = keyword_list
            .iter()
            .map(|kw| json!({ "multi_match": { "query": kw, "fields": fields } }))
            .collect();
        match criteria.keyword_operator {
            KeywordOperator::Or => {
                bool_query.insert("should".to_string(), Value::Array(multi_matches));
                bool_query.insert("minimum_should_match".to_string(), json!(1));
            }
            KeywordOperator::And => {
                bool_query.insert("must".to_string(), Value::Array(multi_matches));
            }
        }
    }

    if !filters.is_empty() {
        bool_query.insert("filter".to_string(), Value::Array(filters));
    }

    json!({ "bool": bool_query })
}

fn build_filter_clauses(criteria: &SearchCriteria) -> Vec<Value> {
    let mut clauses = Vec::new();

    if let Some(organism) = non_empty(criteria.organism) {
        clauses.push(json!({ "term": { "organism.identifier": organism } }));
    }

    if let Some(range) = date_range(criteria.date_published_from, criteria.date_published_to) {
        clauses.push(json!({ "range": { "datePublished": range } }));
    }
    if let Some(range) = date_range(criteria.date_modified_from, criteria.date_modified_to) {
        clauses.push(json!({ "range": { "dateModified": range } }));
    }

    if let Some(types) = non_empty(criteria.types) {
        let type_list: Vec<&str> = types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if !type_list.is_empty() {
            clauses.push(json!({ "terms": { "type": type_list } }));
        }
    }

    // Bioproject-scope filters
    if let Some(umbrella) = criteria.umbrella {
        clauses.push(json!({ "term": { "objectType": umbrella.object_type() } }));
    }
    if let Some(organization) = non_empty(criteria.organization) {
        clauses.push(nested_match("organization", "organization.name", organization));
    }
    if let Some(publication) = non_empty(criteria.publication) {
        clauses.push(nested_match("publication", "publication.title", publication));
    }
    if let Some(grant) = non_empty(criteria.grant) {
        clauses.push(nested_match("grant", "grant.title", grant));
    }

    clauses
}

fn date_range(from: Option<&str>, to: Option<&str>) -> Option<Value> {
    let mut range = Map::new();
    if let Some(from) = non_empty(from) {
        range.insert("gte".to_string(), json!(from));
    }
    if let Some(to) = non_empty(to) {
        range.insert("lte".to_string(), json!(to));
    }
    if range.is_empty() {
        None
    } else {
        Some(Value::Object(range))
    }
}

fn nested_match(path: &str, field: &str, value: &str) -> Value {
    let mut matcher = Map::new();
    matcher.insert(field.to_string(), Value::from(value));

    json!({
        "nested": {
            "path": path,
            "query": { "match": matcher },
        }
    })
}
