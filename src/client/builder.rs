use crate::cache::CacheStore;
use crate::client::core::HttpClient;
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, ProxyDialer, StaticProxy};
use crate::utils::{FileSystem, LocalFs};
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for [`HttpClient`].
///
/// Without an explicit config, `REQCACHE_*` environment variables are read.
#[derive(Default)]
pub struct HttpClientBuilder {
    config: Option<ClientConfig>,
    cache_dir: Option<PathBuf>,
    fs: Option<Arc<dyn FileSystem>>,
    dialer: Option<Arc<dyn ProxyDialer>>,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the cache directory of whatever config ends up being used.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// File system used by the cache and for multipart file fields.
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Dialer consulted for requests with `use_proxy`. Takes precedence over
    /// `proxy_url` in the config.
    pub fn proxy_dialer(mut self, dialer: Arc<dyn ProxyDialer>) -> Self {
        self.dialer = Some(dialer);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut config = self.config.unwrap_or_else(ClientConfig::from_env);
        if let Some(dir) = self.cache_dir {
            config.cache_dir = dir;
        }

        let fs = self.fs.unwrap_or_else(|| Arc::new(LocalFs::new()));
        let dialer = self.dialer.or_else(|| {
            config
                .proxy_url
                .as_ref()
                .map(|url| Arc::new(StaticProxy::new(url.as_str())) as Arc<dyn ProxyDialer>)
        });

        let direct = HttpTransport::direct(&config.user_agent)?;
        let cache = CacheStore::with_fs(config.cache_dir.clone(), fs.clone());

        Ok(HttpClient {
            config,
            cache,
            fs,
            dialer,
            direct,
        })
    }
}
