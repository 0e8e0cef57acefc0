//! Engine HTTP client and streamed `_source` retrieval.

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::StatusCode;
use serde_json::{json, Value};
use url::Url;

use crate::error::{Error, Result};

/// Async client for the engine's REST query API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct EsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EsClient {
    /// Create a client for the engine at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::NotABaseUrl(base_url.to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: url,
        })
    }

    /// Build an endpoint URL from path segments (percent-encoded as needed).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Check whether the engine is reachable.
    pub async fn ping(&self) -> bool {
        match self.http.get(self.base_url.clone()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Engine ping failed");
                false
            }
        }
    }

    /// Execute a search request against an index.
    ///
    /// `track_total_hits` is always set so totals stay accurate for
    /// pagination. Returns the raw engine response.
    pub async fn search(&self, index: &str, mut body: Value) -> Result<Value> {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("track_total_hits".to_string(), json!(true));
        }

        let response = self
            .http
            .post(self.endpoint(&[index, "_search"]))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Count documents matching a query.
    pub async fn count(&self, index: &str, query: Option<&Value>) -> Result<u64> {
        let body = match query {
            Some(query) => json!({ "query": query }),
            None => json!({}),
        };

        let response = self
            .http
            .post(self.endpoint(&[index, "_count"]))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        data.get("count")
            .and_then(Value::as_u64)
            .ok_or(Error::MalformedResponse("count"))
    }

    /// Open a streaming connection to the engine's `_source` endpoint.
    ///
    /// Returns `Ok(None)` when the document does not exist (404). Dropping
    /// the returned [`SourceStream`] closes the upstream connection; this
    /// is the release path for every exit, including client disconnects.
    pub async fn get_source_stream(
        &self,
        index: &str,
        id: &str,
        source_includes: Option<&str>,
    ) -> Result<Option<SourceStream>> {
        let mut url = self.endpoint(&[index, "_source", id]);
        if let Some(includes) = source_includes {
            url.query_pairs_mut().append_pair("_source_includes", includes);
        }

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;

        Ok(Some(SourceStream { response }))
    }
}

/// An open `_source` byte stream.
pub struct SourceStream {
    response: reqwest::Response,
}

impl SourceStream {
    /// Consume the stream as byte chunks.
    pub fn into_bytes_stream(self) -> impl Stream<Item = Result<Bytes>> + Send + 'static {
        self.response.bytes_stream().map_err(Error::from)
    }
}
