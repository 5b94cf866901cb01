//! multipart/form-data body encoding.
//!
//! Builds the whole body in memory so it can be sent as raw bytes with an
//! explicit `Content-Type`.
//!
//! ```rust
//! use reqcache::multipart::MultipartBuilder;
//!
//! let body = MultipartBuilder::with_boundary("xyz")
//!     .text("username", "user123")
//!     .file_bytes("doc", "doc.txt", b"file content".to_vec())
//!     .build();
//! assert_eq!(body.content_type, "multipart/form-data; boundary=xyz");
//! ```

use crate::utils::FileSystem;
use crate::Result;
use std::path::Path;

const CRLF: &str = "\r\n";

#[derive(Debug, Clone)]
enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content: Vec<u8>,
    },
}

/// Encoded body plus the header value announcing its boundary.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MultipartBuilder {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBuilder {
    /// Start a form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file_bytes(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            file_name: file_name.into(),
            content,
        });
        self
    }

    /// Read `path` through `fs` and add it as a file part named after its base name.
    pub fn file(self, name: impl Into<String>, path: &Path, fs: &dyn FileSystem) -> Result<Self> {
        let content = fs.read_file(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(self.file_bytes(name, file_name, content))
    }

    pub fn build(self) -> MultipartBody {
        let content_type = self.content_type();
        let mut out = Vec::new();

        for part in &self.parts {
            out.extend_from_slice(format!("--{}{}", self.boundary, CRLF).as_bytes());
            match part {
                Part::Text { name, value } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"{}{}",
                            escape_quotes(name),
                            CRLF,
                            CRLF
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content,
                } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{}",
                            escape_quotes(name),
                            escape_quotes(file_name),
                            CRLF
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(
                        format!("Content-Type: application/octet-stream{}{}", CRLF, CRLF)
                            .as_bytes(),
                    );
                    out.extend_from_slice(content);
                }
            }
            out.extend_from_slice(CRLF.as_bytes());
        }
        out.extend_from_slice(format!("--{}--{}", self.boundary, CRLF).as_bytes());

        MultipartBody {
            content_type,
            bytes: out,
        }
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn generate_boundary() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
