//! Client configuration.
//!
//! Defaults can be overridden from the environment:
//! - `REQCACHE_CACHE_DIR` (default `http-cache`)
//! - `REQCACHE_USER_AGENT` (default `reqcache/<version>`)
//! - `REQCACHE_PROXY_URL` (no default; enables [`crate::transport::StaticProxy`])
//!
//! or loaded from a YAML file with the same field names.

use crate::cache::DEFAULT_CACHE_DIR;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_USER_AGENT: &str = concat!("reqcache/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub cache_dir: PathBuf,
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy_url: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with any `REQCACHE_*` variables applied on top.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_field_path(path.display().to_string()),
            },
            other => other,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid client config: {}", e),
                ErrorContext::new().with_source("config"),
            )
        })
    }

    fn merge_env(mut self) -> Self {
        if let Some(dir) = env_nonempty("REQCACHE_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(ua) = env_nonempty("REQCACHE_USER_AGENT") {
            self.user_agent = ua;
        }
        if let Some(proxy) = env_nonempty(crate::transport::proxy::PROXY_URL_ENV) {
            self.proxy_url = Some(proxy);
        }
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = ClientConfig::from_yaml_str("cache_dir: /tmp/rc\n").unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/rc"));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.proxy_url, None);
    }

    #[test]
    fn yaml_errors_are_configuration_errors() {
        let err = ClientConfig::from_yaml_str("cache_dir: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn default_user_agent_carries_version() {
        assert!(ClientConfig::default().user_agent.starts_with("reqcache/"));
    }
}
