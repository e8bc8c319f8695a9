//! Cookie parsing and the `Set-Cookie` adapter for attribution capture.
//!
//! The browser's cookie jar is the real attribution store: reads come from
//! the request `Cookie` header, writes become `Set-Cookie` headers on the
//! response. Writes are scoped to the request host only; there is no
//! parent-domain clearing.

use std::collections::HashMap;

use axum::http::HeaderMap;
use axum::http::header::{COOKIE, HeaderValue, SET_COOKIE};
use vatrack_core::attribution::{ATTRIBUTION_TTL_SECS, AttributionStore};

/// Read one cookie value out of the request headers.
pub fn request_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    parse_pairs(raw).remove(name)
}

/// Keep only RFC 6265 cookie-octets. The values come from the query string,
/// so `;`, whitespace, and other separators must not reach the `Set-Cookie`
/// line where they would read as extra cookie attributes.
fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|&c| {
            matches!(c,
                '\x21' | '\x23'..='\x2B' | '\x2D'..='\x3A' | '\x3C'..='\x5B' | '\x5D'..='\x7E')
        })
        .collect()
}

fn parse_pairs(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Attribution store backed by the browser cookie jar.
///
/// Reads see the request cookies; `set`/`clear` accumulate `Set-Cookie`
/// headers to be written onto the response.
#[derive(Debug, Default)]
pub struct BrowserCookies {
    incoming: HashMap<String, String>,
    outgoing: Vec<String>,
}

impl BrowserCookies {
    pub fn from_request(headers: &HeaderMap) -> Self {
        let incoming = headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(parse_pairs)
            .unwrap_or_default();
        Self {
            incoming,
            outgoing: Vec::new(),
        }
    }

    /// Move the accumulated cookies into a response header map.
    pub fn write_to(self, headers: &mut HeaderMap) {
        for cookie in self.outgoing {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.append(SET_COOKIE, value);
            }
        }
    }
}

impl AttributionStore for BrowserCookies {
    fn get(&self, key: &str) -> Option<String> {
        self.incoming.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let value = sanitize_value(value);
        self.incoming.insert(key.to_string(), value.clone());
        self.outgoing.push(format!(
            "{key}={value}; Max-Age={ATTRIBUTION_TTL_SECS}; Path=/; SameSite=Lax"
        ));
    }

    fn clear(&mut self, key: &str) {
        self.incoming.remove(key);
        self.outgoing
            .push(format!("{key}=; Max-Age=0; Path=/; SameSite=Lax"));
    }
}
