//! # reqcache
//!
//! 带磁盘响应缓存与 curl 命令解析的阻塞式 HTTP 客户端工具包。
//!
//! Blocking HTTP client toolkit that caches responses on disk, keyed by a
//! request fingerprint, and builds requests straight from copy-pasted
//! `curl ...` command lines.
//!
//! ## Key Features
//!
//! - **Executor**: [`HttpClient`] sends requests, flattens response headers and
//!   decodes gzip/deflate bodies; multipart uploads, form posts, downloads and
//!   SOAP calls included
//! - **Cache**: one JSON file per [`cache::Fingerprint`] with a time-to-live,
//!   see [`cache`]
//! - **curl import**: [`curl::parse_curl_command`] turns a command line into a
//!   [`RequestConfig`]
//! - **Proxy hook**: requests with `use_proxy` go through a pluggable
//!   [`transport::ProxyDialer`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reqcache::{HttpClient, RequestConfig};
//!
//! fn main() -> reqcache::Result<()> {
//!     let client = HttpClient::builder().cache_dir("http-cache").build()?;
//!
//!     let request: RequestConfig = "curl https://example.com -H 'Accept: text/html'".parse()?;
//!     let request = request.with_cache(300).with_read_cache(true);
//!
//!     let first = client.execute(&request)?;
//!     let second = client.execute(&request)?;
//!     assert!(!first.served_from_cache);
//!     assert!(second.served_from_cache);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Request executor and builder |
//! | [`cache`] | Fingerprinting and the file-backed cache store |
//! | [`curl`] | curl command tokenizer and parser |
//! | [`multipart`] | multipart/form-data body builder |
//! | [`transport`] | Blocking HTTP transport, proxy hook, body decoding |
//! | [`config`] | Client configuration (env / YAML) |
//! | [`types`] | Request and response data types |
//! | [`utils`] | File-system collaborator |

pub mod cache;
pub mod client;
pub mod config;
pub mod curl;
pub mod multipart;
pub mod transport;
pub mod types;
pub mod utils;

pub use client::{HttpClient, HttpClientBuilder};
pub use config::ClientConfig;
pub use curl::parse_curl_command;
pub use types::{FormField, MultipartRequest, RequestConfig, ResponseRecord, SoapRequest, SoapResponse};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
