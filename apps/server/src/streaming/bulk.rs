//! Bulk multi-ID response assembly.
//!
//! Each identifier is fetched with one streaming `_source` call, strictly
//! in input order with a single fetch outstanding at a time: peak memory is
//! bounded by one document body regardless of how many IDs a request
//! carries. Errors raised after the response has started transmitting abort
//! the connection; they cannot be downgraded to a clean error status.

use async_stream::try_stream;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

use quaero_es::{EsClient, SourceStream};

use crate::error::{Error, Result};

/// Read one document body fully, trimming the trailing whitespace the
/// engine appends after `_source` payloads (it would corrupt array framing
/// and produce empty NDJSON lines).
async fn read_source_bytes(stream: SourceStream) -> Result<Bytes> {
    let byte_stream = stream.into_bytes_stream();
    futures::pin_mut!(byte_stream);

    let mut buf = BytesMut::new();
    while let Some(chunk) = byte_stream.next().await {
        buf.extend_from_slice(&chunk?);
    }

    let mut end = buf.len();
    while end > 0 && buf[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    buf.truncate(end);

    Ok(buf.freeze())
}

/// Stream `{"entries":[...],"notFound":[...]}` without materializing more
/// than one document. Found documents pass through as raw bytes in input
/// order; missing identifiers are collected and emitted after the entries
/// array closes.
pub fn bulk_json_stream(
    es: EsClient,
    index: String,
    ids: Vec<String>,
) -> impl Stream<Item = Result<Bytes>> {
    try_stream! {
        yield Bytes::from_static(b"{\"entries\":[");

        let mut not_found: Vec<String> = Vec::new();
        let mut first = true;
        for id in &ids {
            match es.get_source_stream(&index, id, None).await? {
                None => not_found.push(id.clone()),
                Some(stream) => {
                    if !first {
                        yield Bytes::from_static(b",");
                    }
                    first = false;
                    yield read_source_bytes(stream).await?;
                }
            }
        }

        yield Bytes::from_static(b"],\"notFound\":");
        let not_found =
            serde_json::to_vec(&not_found).map_err(|e| Error::Other(e.into()))?;
        yield Bytes::from(not_found);
        yield Bytes::from_static(b"}");
    }
}

/// Stream one document per line (NDJSON). Identifiers that are not found
/// produce no output line.
pub fn bulk_ndjson_stream(
    es: EsClient,
    index: String,
    ids: Vec<String>,
) -> impl Stream<Item = Result<Bytes>> {
    try_stream! {
        for id in &ids {
            if let Some(stream) = es.get_source_stream(&index, id, None).await? {
                yield read_source_bytes(stream).await?;
                yield Bytes::from_static(b"\n");
            }
        }
    }
}
