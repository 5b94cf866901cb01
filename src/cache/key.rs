//! Request fingerprinting.

use crate::types::RequestConfig;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Lowercase hex SHA-256 identifying equivalent requests.
///
/// Only `[0-9a-f]` ever appears, so the value is safe to use as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash method, URL, the header set and the body of a request.
    pub fn of(config: &RequestConfig) -> Self {
        Self::from_parts(
            &config.method,
            &config.url,
            &config.headers,
            config.body.as_deref().unwrap_or_default(),
        )
    }

    pub fn from_parts(
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        body: &[u8],
    ) -> Self {
        let mut canonical = String::with_capacity(url.len() + 128);
        canonical.push_str(method);
        canonical.push(' ');
        canonical.push_str(url);
        canonical.push('\n');
        canonical.push_str(&canonical_headers(headers));
        canonical.push_str(&hex_digest(body));
        Self(hex_digest(canonical.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render headers as `name: value\n` lines sorted by name.
fn canonical_headers(headers: &HashMap<String, String>) -> String {
    let mut names: Vec<&String> = headers.keys().collect();
    names.sort();

    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(&headers[name]);
        out.push('\n');
    }
    out
}

fn hex_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
