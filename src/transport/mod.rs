//! Transport layer: blocking HTTP dispatch, proxy hook and body decoding.

pub mod compression;
pub mod http;
pub mod proxy;

pub use compression::{decode_body, ContentEncoding};
pub use http::{HttpTransport, SentResponse};
pub use proxy::{HeaderProxy, ProxyDialer, StaticProxy};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Proxy error: {0}")]
    Proxy(String),

    #[error("Transport error: {0}")]
    Other(String),
}
