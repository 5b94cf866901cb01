use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or input element that caused the error (e.g., "url", "headers.Accept")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending token)
    pub details: Option<String>,
    /// Source of the error (e.g., "curl_parser", "cache_store")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for reqcache.
///
/// Cache misses are not errors (see [`crate::cache::CacheLookup`]) and a body
/// that fails to decompress degrades to an empty body instead of surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {message}{}", format_context(.context))]
    Parse {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("HTTP request to {url} failed with status code: {status}")]
    Status { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a parse error with structured context
    pub fn parse_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Parse {
            message: msg.into(),
            context,
        }
    }

    /// Create a configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Parse { context, .. } | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// True for failures that happened on the wire (DNS, connect, timeout, proxy).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(TransportError::Http(e)) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_display() {
        let err = Error::parse_with_context(
            "URL not found in curl command",
            ErrorContext::new()
                .with_field_path("url")
                .with_source("curl_parser"),
        );
        assert_eq!(
            err.to_string(),
            "Parse error: URL not found in curl command (field: url, source: curl_parser)"
        );
        assert_eq!(err.context().and_then(|c| c.field_path.as_deref()), Some("url"));
    }

    #[test]
    fn empty_context_adds_nothing() {
        let err = Error::configuration("bad cache dir");
        assert_eq!(err.to_string(), "Configuration error: bad cache dir");
        assert!(!err.is_transport());
    }
}
