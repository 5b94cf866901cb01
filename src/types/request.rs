//! Request descriptor consumed by the executor.

use std::collections::HashMap;
use std::time::Duration;

/// Timeout applied to parsed curl commands and `RequestConfig::new`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single outbound request plus its caching and transport switches.
///
/// Header names are kept exactly as given; inserting a name twice keeps the
/// last value. The executor only reads this value, it never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    /// Zero disables the timeout.
    pub timeout: Duration,
    /// Write the live response to the cache.
    pub use_cache: bool,
    /// Try the cache before going to the network.
    pub read_cache: bool,
    pub cache_ttl_seconds: i64,
    pub use_proxy: bool,
    /// Include the response body in the `http <-` log line.
    pub log_response: bool,
}

impl RequestConfig {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            use_cache: false,
            read_cache: false,
            cache_ttl_seconds: 0,
            use_proxy: false,
            log_response: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Write responses back to the cache with the given time-to-live.
    pub fn with_cache(mut self, ttl_seconds: i64) -> Self {
        self.use_cache = true;
        self.cache_ttl_seconds = ttl_seconds;
        self
    }

    pub fn with_read_cache(mut self, enable: bool) -> Self {
        self.read_cache = enable;
        self
    }

    pub fn with_proxy(mut self, enable: bool) -> Self {
        self.use_proxy = enable;
        self
    }

    pub fn with_log_response(mut self, enable: bool) -> Self {
        self.log_response = enable;
        self
    }

    /// Fingerprint used as the cache key for this request.
    pub fn fingerprint(&self) -> crate::cache::Fingerprint {
        crate::cache::Fingerprint::of(self)
    }
}
