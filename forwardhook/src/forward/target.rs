//! Target URL construction.

use percent_encoding::percent_decode;
use url::{form_urlencoded, Url};

use super::request::QueryPair;
use crate::error::{ForwardError, Result};

/// Decode a raw query string into ordered key/value pairs.
///
/// Pairs are kept as bytes: a value such as `caf%E9` is not valid UTF-8 and
/// must reach the destination unchanged.
pub fn parse_query(raw: Option<&str>) -> Vec<QueryPair> {
    let raw = match raw {
        Some(q) => q,
        None => return Vec::new(),
    };

    raw.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// `+` is a space in form encoding; everything else is percent-decoded.
fn decode_component(raw: &str) -> Vec<u8> {
    let spaced = raw.replace('+', " ");
    percent_decode(spaced.as_bytes()).collect()
}

/// Re-encode pairs as `application/x-www-form-urlencoded`.
fn encode_query(query: &[QueryPair]) -> String {
    query
        .iter()
        .map(|(key, value)| {
            let key: String = form_urlencoded::byte_serialize(key).collect();
            let value: String = form_urlencoded::byte_serialize(value).collect();
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the URL a hook is forwarded to.
///
/// The destination's own query string is replaced, not merged: whatever the
/// inbound hook carried becomes the whole query. An inbound hook without query
/// parameters therefore clears the destination's.
///
/// Pairs are written in the order the caller sent them. They are not sorted
/// by key.
pub fn build_target(destination: &str, query: &[QueryPair]) -> Result<Url> {
    let mut url = Url::parse(destination).map_err(|source| ForwardError::InvalidDestination {
        url: destination.to_string(),
        source,
    })?;

    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&encode_query(query)));
    }

    Ok(url)
}
