//! 响应缓存模块：按请求指纹将响应持久化到磁盘。
//!
//! # Response Caching Module
//!
//! Responses are stored as one JSON file per request fingerprint and expire
//! after their time-to-live. There is no size-based eviction.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Fingerprint`] | SHA-256 over method, URL, sorted headers and body |
//! | [`CacheStore`] | `put` / `get` / `delete` of [`crate::ResponseRecord`]s |
//! | [`CacheLookup`] | Hit, miss or expired |
//!
//! ## Example
//!
//! ```rust,no_run
//! use reqcache::cache::{CacheLookup, CacheStore};
//! use reqcache::RequestConfig;
//!
//! let store = CacheStore::new("http-cache");
//! let fp = RequestConfig::get("https://example.com").fingerprint();
//! match store.get(&fp)? {
//!     CacheLookup::Hit(record) => println!("{}", record.status_code),
//!     CacheLookup::Miss | CacheLookup::Expired => println!("go fetch it"),
//! }
//! # Ok::<(), reqcache::Error>(())
//! ```

mod key;
mod store;

pub use key::Fingerprint;
pub use store::{CacheLookup, CacheStore, DEFAULT_CACHE_DIR};
