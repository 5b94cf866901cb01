//! Multipart and SOAP request types.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use super::request::DEFAULT_TIMEOUT;

/// One field of a multipart upload, sent in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text { name: String, value: String },
    /// Contents are read from `path` when the body is built.
    File { name: String, path: PathBuf },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormField::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        FormField::File {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }
}

/// Multipart upload; never cached.
#[derive(Debug, Clone)]
pub struct MultipartRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub timeout: Duration,
    pub fields: Vec<FormField>,
}

impl MultipartRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
            fields: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SoapRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub timeout: Duration,
    pub log_body: bool,
}

impl SoapRequest {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: body.into(),
            timeout: DEFAULT_TIMEOUT,
            log_body: false,
        }
    }

    pub fn with_action(self, action: impl Into<String>) -> Self {
        self.with_header("SOAPAction", action)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoapResponse {
    pub elapsed_millis: i64,
    pub status_code: u16,
    /// Repeated header values are concatenated.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl SoapResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
