//! Pluggable proxy hook.
//!
//! The crate has no proxy implementation of its own: when a request asks for
//! a proxy, the configured [`ProxyDialer`] hands back a `reqwest::Proxy`.
//! A missing dialer or a dialer error fails the call.

use super::TransportError;
use crate::types::RequestConfig;

/// Environment variable naming the proxy for [`StaticProxy`], read by
/// [`crate::ClientConfig::from_env`].
pub const PROXY_URL_ENV: &str = "REQCACHE_PROXY_URL";

pub trait ProxyDialer: Send + Sync {
    fn dial(&self, request: &RequestConfig) -> Result<reqwest::Proxy, TransportError>;
}

/// Routes every proxied request through one fixed proxy URL.
#[derive(Debug, Clone)]
pub struct StaticProxy {
    url: String,
}

impl StaticProxy {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ProxyDialer for StaticProxy {
    fn dial(&self, _request: &RequestConfig) -> Result<reqwest::Proxy, TransportError> {
        reqwest::Proxy::all(&self.url)
            .map_err(|e| TransportError::Proxy(format!("invalid proxy url {}: {}", self.url, e)))
    }
}

/// Uses the value of the request's `Proxy` header as the proxy URL.
///
/// This pairs with curl commands carrying `-H "Proxy: http://host:port"`,
/// which is what makes the parser set `use_proxy`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProxy;

impl ProxyDialer for HeaderProxy {
    fn dial(&self, request: &RequestConfig) -> Result<reqwest::Proxy, TransportError> {
        let url = request
            .headers
            .get("Proxy")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TransportError::Proxy("request has no Proxy header".to_string()))?;
        StaticProxy::new(url.as_str()).dial(request)
    }
}
