//! Shared test harness: the real router wired to a mock search engine.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use quaero::config::{Config, ElasticsearchConfig, LoggingConfig, ServerConfig};
use quaero::{api, AppState};

pub const URL_PREFIX: &str = "/search/api";
pub const BASE_URL: &str = "http://localhost:8080/search/api";

pub struct TestApp {
    pub engine: MockServer,
    router: Router,
}

pub async fn test_app() -> TestApp {
    init_tracing();

    let engine = MockServer::start().await;
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            url_prefix: URL_PREFIX.to_string(),
            base_url: BASE_URL.to_string(),
            cors_origins: vec!["*".to_string()],
        },
        elasticsearch: ElasticsearchConfig { url: engine.uri() },
        logging: LoggingConfig {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "test".to_string(),
        },
    };
    config.validate().expect("test config must be valid");

    let state = AppState::new(config).expect("failed to build state");
    let router = api::create_router(state);

    TestApp { engine, router }
}

impl TestApp {
    /// Run one request through the router without binding a socket.
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Vec<u8>, HeaderMap) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router must answer");
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body must collect")
            .to_bytes()
            .to_vec();

        (status, body, headers)
    }

    /// GET an API path (relative to the URL prefix).
    pub async fn get(&self, path: &str) -> (StatusCode, Vec<u8>, HeaderMap) {
        let request = Request::get(format!("{URL_PREFIX}{path}"))
            .body(Body::empty())
            .expect("request must build");
        self.request(request).await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let (status, body, _) = self.get(path).await;
        let value = serde_json::from_slice(&body)
            .unwrap_or_else(|e| panic!("body must be JSON ({e}): {}", String::from_utf8_lossy(&body)));
        (status, value)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Vec<u8>, HeaderMap) {
        let request = Request::post(format!("{URL_PREFIX}{path}"))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("body must serialize")))
            .expect("request must build");
        self.request(request).await
    }
}

pub fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|e| panic!("body must be JSON ({e}): {}", String::from_utf8_lossy(body)))
}

/// Assert an RFC 7807 problem response.
pub fn assert_problem(status: StatusCode, body: &[u8], headers: &HeaderMap, expected: u16) {
    assert_eq!(status.as_u16(), expected);
    assert_eq!(
        headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "application/problem+json"
    );
    let problem = json_body(body);
    assert_eq!(problem["status"], expected);
    assert_eq!(problem["type"], "about:blank");
    assert!(problem["detail"].is_string());
    assert!(problem["timestamp"].is_string());
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "quaero=info".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
