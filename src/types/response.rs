//! Normalized response record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of one call, either fetched live or read back from the cache.
///
/// This is also the on-disk cache format: one indented JSON object per file,
/// with the body stored as a base64 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub source_url: String,
    pub method: String,
    pub elapsed_millis: i64,
    pub status_code: u16,
    /// One value per header name; later values of repeated headers are dropped.
    pub headers: BTreeMap<String, String>,
    #[serde(with = "body_base64")]
    pub body: Vec<u8>,
    pub served_from_cache: bool,
    pub created_at_unix: i64,
    pub cache_ttl_seconds: i64,
}

impl ResponseRecord {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Lossy UTF-8 view of the body.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True once `now` reaches the end of the time-to-live window.
    ///
    /// The boundary second itself counts as expired, one second earlier than
    /// a strict `now > created + ttl` check, so a zero TTL is never served.
    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        now_unix >= self.created_at_unix.saturating_add(self.cache_ttl_seconds)
    }
}

mod body_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(body))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_base64_on_the_wire() {
        let record = ResponseRecord {
            body: b"hello".to_vec(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["body"], "aGVsbG8=");

        let back: ResponseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.body, b"hello");
    }

    #[test]
    fn expiry_window() {
        let record = ResponseRecord {
            created_at_unix: 1_000,
            cache_ttl_seconds: 60,
            ..Default::default()
        };
        assert!(!record.is_expired_at(1_059));
        assert!(record.is_expired_at(1_060));

        let zero = ResponseRecord {
            created_at_unix: 1_000,
            ..Default::default()
        };
        assert!(zero.is_expired_at(1_000));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut record = ResponseRecord::default();
        record
            .headers
            .insert("Content-Type".into(), "text/plain".into());
        assert_eq!(record.header("content-type"), Some("text/plain"));
        assert_eq!(record.header("etag"), None);
    }
}
