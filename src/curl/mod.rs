//! Build a [`crate::RequestConfig`] from a copy-pasted curl command.
//!
//! ```rust
//! let config = reqcache::curl::parse_curl_command(
//!     r#"curl -X POST https://example.com -H "Content-Type: application/json" --data '{"key":"value"}'"#,
//! )?;
//! assert_eq!(config.method, "POST");
//! assert_eq!(config.body.as_deref(), Some(&br#"{"key":"value"}"#[..]));
//! # Ok::<(), reqcache::Error>(())
//! ```

mod parser;
pub mod tokenizer;

pub use parser::parse_curl_command;
