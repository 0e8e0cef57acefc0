//! Facet endpoint and service endpoint tests.

mod support;

use axum::body::Body;
use axum::http::Request;
use serde_json::json;
use support::{assert_problem, json_body, test_app};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn aggregations() -> serde_json::Value {
    json!({
        "organism": { "buckets": [ { "key": "Mus musculus", "doc_count": 3 } ] },
        "status": { "buckets": [ { "key": "public", "doc_count": 11 } ] },
        "accessibility": { "buckets": [] },
        "type": { "buckets": [ { "key": "biosample", "doc_count": 8 } ] },
        "objectType": { "buckets": [ { "key": "BioProject", "doc_count": 6 } ] },
    })
}

async fn mount_facet_search(engine: &MockServer, index: &str, expected_body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/{index}/_search")))
        .and(body_partial_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "total": { "value": 28 }, "hits": [] },
            "aggregations": aggregations(),
        })))
        .expect(1)
        .mount(engine)
        .await;
}

#[tokio::test]
async fn cross_type_facets_have_type_but_not_object_type() {
    let app = test_app().await;
    mount_facet_search(
        &app.engine,
        "entries",
        json!({
            "size": 0,
            "aggs": {
                "organism": { "terms": { "field": "organism.name", "size": 50 } },
                "type": { "terms": { "field": "type", "size": 50 } },
            },
        }),
    )
    .await;

    let (status, body) = app.get_json("/facets").await;

    assert_eq!(status, 200);
    let facets = &body["facets"];
    assert_eq!(facets["organism"], json!([{ "value": "Mus musculus", "count": 3 }]));
    assert_eq!(facets["status"], json!([{ "value": "public", "count": 11 }]));
    assert_eq!(facets["accessibility"], json!([]));
    assert_eq!(facets["type"], json!([{ "value": "biosample", "count": 8 }]));
    assert!(facets.get("objectType").is_none());
}

#[tokio::test]
async fn bioproject_facets_have_object_type_but_not_type() {
    let app = test_app().await;
    mount_facet_search(
        &app.engine,
        "bioproject",
        json!({
            "size": 0,
            "aggs": { "objectType": { "terms": { "field": "objectType", "size": 50 } } },
        }),
    )
    .await;

    let (status, body) = app.get_json("/facets/bioproject").await;

    assert_eq!(status, 200);
    let facets = &body["facets"];
    assert_eq!(facets["objectType"], json!([{ "value": "BioProject", "count": 6 }]));
    assert!(facets.get("type").is_none());
}

#[tokio::test]
async fn other_type_facets_have_neither_conditional_facet() {
    let app = test_app().await;
    mount_facet_search(&app.engine, "jga-dataset", json!({ "size": 0 })).await;

    let (status, body) = app.get_json("/facets/jga-dataset").await;

    assert_eq!(status, 200);
    let facets = &body["facets"];
    assert!(facets.get("type").is_none());
    assert!(facets.get("objectType").is_none());
    assert!(facets.get("organism").is_some());
}

#[tokio::test]
async fn facet_filters_compile_into_the_query() {
    let app = test_app().await;
    mount_facet_search(
        &app.engine,
        "entries",
        json!({
            "query": {
                "bool": {
                    "should": [
                        { "multi_match": { "query": "cancer", "fields": ["title"] } },
                    ],
                    "minimum_should_match": 1,
                    "filter": [ { "term": { "organism.identifier": "9606" } } ],
                }
            },
            "size": 0,
        }),
    )
    .await;

    let (status, _) = app
        .get_json("/facets?keywords=cancer&keywordFields=title&keywordOperator=OR&organism=9606")
        .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn invalid_keyword_fields_on_facets_are_422() {
    let app = test_app().await;
    let (status, body, headers) = app.get("/facets?keywordFields=bogus").await;
    assert_problem(status, &body, &headers, 422);
}

// === Ambient service endpoints ===

#[tokio::test]
async fn service_info_reports_name_and_version() {
    let app = test_app().await;
    let (status, body) = app.get_json("/service-info").await;

    assert_eq!(status, 200);
    assert_eq!(body["name"], "Quaero Search API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["description"].as_str().unwrap().contains("BioProject"));
}

#[tokio::test]
async fn count_types_is_not_implemented() {
    let app = test_app().await;
    let (status, body, headers) = app.get("/count/types/").await;
    assert_problem(status, &body, &headers, 501);
}

#[tokio::test]
async fn health_lives_at_the_server_root() {
    let app = test_app().await;
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body, _) = app.request(request).await;

    assert_eq!(status, 200);
    assert_eq!(json_body(&body)["status"], "ok");
}
