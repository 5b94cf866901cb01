//! Blocking HTTP client with an on-disk response cache.
//!
//! Keep the public surface small: [`HttpClient`] and its builder. Each kind
//! of call lives in its own submodule under `src/client/`.

pub mod builder;
pub mod core;
mod download;
mod execution;
mod soap;
mod upload;

pub use builder::HttpClientBuilder;
pub use core::HttpClient;
