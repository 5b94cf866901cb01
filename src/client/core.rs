use crate::cache::CacheStore;
use crate::config::ClientConfig;
use crate::transport::http::{flatten_headers, SentResponse};
use crate::transport::{decode_body, HttpTransport, ProxyDialer, TransportError};
use crate::types::{RequestConfig, ResponseRecord};
use crate::utils::FileSystem;
use crate::{Error, Result};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

/// Client issuing requests and maintaining the response cache.
///
/// Calls are synchronous. The client can be shared between threads; the only
/// state shared between calls is the cache directory.
pub struct HttpClient {
    pub(crate) config: ClientConfig,
    pub(crate) cache: CacheStore,
    pub(crate) fs: Arc<dyn FileSystem>,
    pub(crate) dialer: Option<Arc<dyn ProxyDialer>>,
    pub(crate) direct: HttpTransport,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("has_dialer", &self.dialer.is_some())
            .finish()
    }
}

impl HttpClient {
    /// Client configured from `REQCACHE_*` environment variables.
    pub fn new() -> Result<Self> {
        crate::client::HttpClientBuilder::new().build()
    }

    pub fn builder() -> crate::client::HttpClientBuilder {
        crate::client::HttpClientBuilder::new()
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Direct transport, or a fresh proxied one when the request asks for it.
    pub(crate) fn transport_for(&self, request: &RequestConfig) -> Result<Cow<'_, HttpTransport>> {
        if !request.use_proxy {
            return Ok(Cow::Borrowed(&self.direct));
        }

        let dialer = self.dialer.as_ref().ok_or_else(|| {
            Error::Transport(TransportError::Proxy(
                "proxy requested but no proxy dialer is configured".to_string(),
            ))
        })?;
        let proxy = dialer.dial(request)?;
        debug!(url = %request.url, "using proxied transport");
        Ok(Cow::Owned(HttpTransport::proxied(
            &self.config.user_agent,
            proxy,
        )?))
    }
}

/// Turn a wire response into a record: flattened headers, decoded body.
pub(crate) fn into_record(method: &str, url: &str, sent: SentResponse) -> ResponseRecord {
    let headers = flatten_headers(&sent.headers);
    let body = decode_body(&headers, sent.body);
    ResponseRecord {
        source_url: url.to_string(),
        method: method.to_string(),
        elapsed_millis: sent.elapsed_millis,
        status_code: sent.status,
        headers,
        body,
        ..Default::default()
    }
}

pub(crate) fn log_response(record: &ResponseRecord, with_body: bool) {
    if with_body {
        info!(
            elapsed_ms = record.elapsed_millis,
            status = record.status_code,
            method = %record.method,
            url = %record.source_url,
            body = %String::from_utf8_lossy(&record.body),
            "http <-"
        );
    } else {
        info!(
            elapsed_ms = record.elapsed_millis,
            status = record.status_code,
            method = %record.method,
            url = %record.source_url,
            "http <-"
        );
    }
}
