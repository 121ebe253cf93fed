//! Snapshot of an inbound hook and the header set sent downstream.

use bytes::Bytes;
use reqwest::header::HeaderMap;

/// Headers owned by the transport rather than the hook payload.
///
/// These describe the inbound connection and framing, so they are recomputed
/// for each outbound request unless verbatim replication is switched on.
pub const TRANSPORT_HEADERS: &[&str] = &[
    "host",
    "content-length",
    "transfer-encoding",
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "upgrade",
];

/// A decoded query key and value. Bytes, since inbound values need not be
/// valid UTF-8.
pub type QueryPair = (Vec<u8>, Vec<u8>);

/// Immutable copy of one inbound hook, shared by every forward task spawned
/// for it.
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    /// Inbound headers, including repeated values.
    pub headers: HeaderMap,
    /// Raw inbound body. Empty when the body could not be read.
    pub body: Bytes,
    /// Decoded query pairs in the order they appeared.
    pub query: Vec<QueryPair>,
}

impl CapturedRequest {
    pub fn new(headers: HeaderMap, body: Bytes, query: Vec<QueryPair>) -> Self {
        Self {
            headers,
            body,
            query,
        }
    }
}

/// Headers to put on an outbound request.
///
/// With `preserve_transport` every inbound header is copied as-is. Otherwise
/// the transport-managed set is dropped and the HTTP client fills in its own.
pub fn outbound_headers(inbound: &HeaderMap, preserve_transport: bool) -> HeaderMap {
    let mut headers = inbound.clone();
    if preserve_transport {
        return headers;
    }

    for name in TRANSPORT_HEADERS {
        headers.remove(*name);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONNECTION, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};

    fn inbound() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("hooks.internal:8001"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("7"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert("proxy-connection", HeaderValue::from_static("close"));
        headers.insert("te", HeaderValue::from_static("trailers"));
        headers.insert("trailer", HeaderValue::from_static("expires"));
        headers.insert("upgrade", HeaderValue::from_static("websocket"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.append("x-event", HeaderValue::from_static("push"));
        headers.append("x-event", HeaderValue::from_static("ping"));
        headers
    }

    #[test]
    fn test_outbound_headers_strips_transport() {
        let headers = outbound_headers(&inbound(), false);

        for name in TRANSPORT_HEADERS {
            assert!(headers.get(*name).is_none(), "{name} should be stripped");
        }
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_outbound_headers_keeps_repeated_values() {
        let headers = outbound_headers(&inbound(), false);
        let events: Vec<_> = headers.get_all("x-event").iter().collect();
        assert_eq!(events, vec!["push", "ping"]);
    }

    #[test]
    fn test_outbound_headers_preserve_transport() {
        let original = inbound();
        let headers = outbound_headers(&original, true);
        assert_eq!(headers, original);
        assert_eq!(headers.get(HOST).unwrap(), "hooks.internal:8001");
    }
}
