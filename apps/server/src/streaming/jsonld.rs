//! Linked-data prefix injection for streamed JSON documents.
//!
//! The upstream document is forwarded chunk by chunk without
//! deserialization; a one-shot transform splices `"@context"` and `"@id"`
//! members immediately after the document's first opening brace. The brace
//! may arrive in any chunk, not just the first.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InjectState {
    BeforeBrace,
    Injected,
}

/// One-shot transform state machine over a JSON byte stream.
pub struct JsonLdInjector {
    prefix: Vec<u8>,
    state: InjectState,
}

impl JsonLdInjector {
    pub fn new(context_url: &str, at_id: &str) -> Self {
        // serde_json string serialization handles escaping.
        let prefix = format!(
            "{{\"@context\":{},\"@id\":{},",
            serde_json::Value::from(context_url),
            serde_json::Value::from(at_id),
        )
        .into_bytes();

        Self {
            prefix,
            state: InjectState::BeforeBrace,
        }
    }

    /// Transform one chunk: before the first `{` chunks pass through
    /// unchanged, the chunk containing it has the brace replaced by the
    /// brace-plus-prefix, and every later chunk passes through untouched.
    pub fn transform(&mut self, chunk: Bytes) -> Bytes {
        if self.state == InjectState::Injected {
            return chunk;
        }

        match chunk.iter().position(|&b| b == b'{') {
            Some(pos) => {
                self.state = InjectState::Injected;
                let mut out = BytesMut::with_capacity(chunk.len() + self.prefix.len());
                out.extend_from_slice(&chunk[..pos]);
                out.extend_from_slice(&self.prefix);
                out.extend_from_slice(&chunk[pos + 1..]);
                out.freeze()
            }
            None => chunk,
        }
    }
}

/// Wrap a byte stream with linked-data injection.
pub fn inject_jsonld<S, E>(
    stream: S,
    context_url: &str,
    at_id: &str,
) -> impl Stream<Item = Result<Bytes, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let mut injector = JsonLdInjector::new(context_url, at_id);
    stream.map(move |chunk| chunk.map(|c| injector.transform(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const CONTEXT: &str = "https://example.com/ctx/bioproject.jsonld";
    const AT_ID: &str = "http://localhost:8080/search/api/entries/bioproject/PRJDB1";

    fn run_injector(chunks: &[&[u8]]) -> Vec<u8> {
        let mut injector = JsonLdInjector::new(CONTEXT, AT_ID);
        chunks
            .iter()
            .flat_map(|c| injector.transform(Bytes::copy_from_slice(c)))
            .collect()
    }

    fn assert_injected(output: &[u8], original: &Value) {
        let value: Value = serde_json::from_slice(output).unwrap();
        assert_eq!(value["@context"], json!(CONTEXT));
        assert_eq!(value["@id"], json!(AT_ID));
        for (key, expected) in original.as_object().unwrap() {
            assert_eq!(&value[key], expected);
        }
        // exactly @context + @id + the original members
        assert_eq!(
            value.as_object().unwrap().len(),
            original.as_object().unwrap().len() + 2
        );
    }

    #[test]
    fn injects_into_single_chunk() {
        let doc = json!({ "identifier": "PRJDB1", "title": "t" });
        let bytes = serde_json::to_vec(&doc).unwrap();
        let output = run_injector(&[&bytes]);
        assert_injected(&output, &doc);
    }

    #[test]
    fn injects_when_document_is_split_across_many_chunks() {
        let doc = json!({ "identifier": "PRJDB1", "organism": { "name": "Homo sapiens" } });
        let bytes = serde_json::to_vec(&doc).unwrap();
        for chunk_size in [1, 2, 3, 7] {
            let chunks: Vec<&[u8]> = bytes.chunks(chunk_size).collect();
            let output = run_injector(&chunks);
            assert_injected(&output, &doc);
        }
    }

    #[test]
    fn brace_in_a_later_chunk_is_handled() {
        // leading whitespace fills the first chunks entirely
        let output = run_injector(&[b"  ", b"\n", b"{\"identifier\":\"PRJDB1\"}"]);
        assert_injected(&output, &json!({ "identifier": "PRJDB1" }));
    }

    #[test]
    fn injection_happens_exactly_once() {
        // nested objects contain more braces; only the first is touched
        let doc = json!({ "organism": { "name": "x" }, "properties": { "a": { "b": 1 } } });
        let bytes = serde_json::to_vec(&doc).unwrap();
        let output = run_injector(&[&bytes]);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("@context").count(), 1);
        assert_eq!(text.matches("@id").count(), 1);
    }

    #[test]
    fn special_characters_in_id_are_escaped() {
        let mut injector = JsonLdInjector::new(CONTEXT, "http://x/entries/bioproject/PRJ\"1");
        let output = injector.transform(Bytes::from_static(b"{}"));
        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["@id"], json!("http://x/entries/bioproject/PRJ\"1"));
    }
}
