//! Bulk endpoint tests: array and NDJSON modes, caps, and ordering.

mod support;

use serde_json::json;
use support::{assert_problem, json_body, test_app};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a `_source` response; the engine appends a trailing newline after
/// document payloads, which the gateway must trim.
async fn mount_source(engine: &MockServer, index: &str, id: &str, doc: serde_json::Value) {
    let mut raw = serde_json::to_vec(&doc).unwrap();
    raw.push(b'\n');
    Mock::given(method("GET"))
        .and(path(format!("/{index}/_source/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(raw, "application/json"))
        .mount(engine)
        .await;
}

#[tokio::test]
async fn array_mode_reports_entries_and_not_found() {
    let app = test_app().await;
    mount_source(&app.engine, "biosample", "SAMD1", json!({ "identifier": "SAMD1" })).await;
    mount_source(&app.engine, "biosample", "SAMD2", json!({ "identifier": "SAMD2" })).await;
    // MISSING is not mounted: the engine answers 404

    let (status, body, headers) = app
        .post_json(
            "/entries/biosample/bulk",
            json!({ "ids": ["SAMD1", "MISSING", "SAMD2"] }),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    let result = json_body(&body);
    assert_eq!(
        result["entries"],
        json!([{ "identifier": "SAMD1" }, { "identifier": "SAMD2" }])
    );
    assert_eq!(result["notFound"], json!(["MISSING"]));
    // every input ID is accounted for exactly once
    assert_eq!(
        result["entries"].as_array().unwrap().len() + result["notFound"].as_array().unwrap().len(),
        3
    );
}

#[tokio::test]
async fn array_mode_with_empty_input_yields_empty_envelope() {
    let app = test_app().await;
    let (status, body, _) = app
        .post_json("/entries/biosample/bulk", json!({ "ids": [] }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(json_body(&body), json!({ "entries": [], "notFound": [] }));
}

#[tokio::test]
async fn duplicate_ids_are_fetched_and_emitted_twice() {
    let app = test_app().await;
    mount_source(&app.engine, "biosample", "SAMD1", json!({ "identifier": "SAMD1" })).await;

    let (status, body, _) = app
        .post_json("/entries/biosample/bulk", json!({ "ids": ["SAMD1", "SAMD1"] }))
        .await;

    assert_eq!(status, 200);
    let result = json_body(&body);
    assert_eq!(result["entries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn ndjson_mode_emits_one_line_per_found_document() {
    let app = test_app().await;
    mount_source(&app.engine, "sra-run", "SRR1", json!({ "identifier": "SRR1" })).await;
    mount_source(&app.engine, "sra-run", "SRR2", json!({ "identifier": "SRR2" })).await;

    let (status, body, headers) = app
        .post_json(
            "/entries/sra-run/bulk?format=ndjson",
            json!({ "ids": ["SRR1", "MISSING", "SRR2"] }),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/x-ndjson"
    );
    let text = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        let doc: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(doc["identifier"].as_str().unwrap().starts_with("SRR"));
    }
    // not-found IDs produce no output at all
    assert!(!text.contains("MISSING"));
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn ndjson_mode_with_all_missing_yields_zero_bytes() {
    let app = test_app().await;
    let (status, body, _) = app
        .post_json(
            "/entries/sra-run/bulk?format=ndjson",
            json!({ "ids": ["M1", "M2"] }),
        )
        .await;

    assert_eq!(status, 200);
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_variant_takes_comma_separated_ids() {
    let app = test_app().await;
    mount_source(&app.engine, "biosample", "SAMD1", json!({ "identifier": "SAMD1" })).await;

    let (status, body, _) = app.get("/entries/biosample/bulk?ids=SAMD1,MISSING").await;

    assert_eq!(status, 200);
    let result = json_body(&body);
    assert_eq!(result["entries"].as_array().unwrap().len(), 1);
    assert_eq!(result["notFound"], json!(["MISSING"]));
}

#[tokio::test]
async fn get_variant_without_ids_is_422() {
    let app = test_app().await;
    let (status, body, headers) = app.get("/entries/biosample/bulk").await;
    assert_problem(status, &body, &headers, 422);
}

#[tokio::test]
async fn more_than_the_cap_is_422() {
    let app = test_app().await;
    let ids: Vec<String> = (0..1001).map(|i| format!("ID{i}")).collect();
    let (status, body, headers) = app
        .post_json("/entries/biosample/bulk", json!({ "ids": ids }))
        .await;
    assert_problem(status, &body, &headers, 422);
}

#[tokio::test]
async fn unknown_type_on_bulk_is_404() {
    let app = test_app().await;
    let (status, body, headers) = app
        .post_json("/entries/genbank/bulk", json!({ "ids": ["X"] }))
        .await;
    assert_problem(status, &body, &headers, 404);
}
