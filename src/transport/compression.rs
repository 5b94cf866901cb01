//! Response body decompression driven by `Content-Encoding`.

use flate2::read::{DeflateDecoder, GzDecoder};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    Deflate,
    Unsupported(String),
}

impl ContentEncoding {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            ContentEncoding::Identity
        } else if value.eq_ignore_ascii_case("gzip") {
            ContentEncoding::Gzip
        } else if value.eq_ignore_ascii_case("deflate") {
            ContentEncoding::Deflate
        } else {
            ContentEncoding::Unsupported(value.to_string())
        }
    }

    pub fn from_headers(headers: &BTreeMap<String, String>) -> Self {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-encoding"))
            .map(|(_, value)| Self::parse(value))
            .unwrap_or(ContentEncoding::Identity)
    }
}

/// Decode `body` according to the response headers.
///
/// A body that fails to decompress, or uses a coding we do not know, comes
/// back empty. Compressed bytes are never passed through as plain content.
pub fn decode_body(headers: &BTreeMap<String, String>, body: Vec<u8>) -> Vec<u8> {
    match ContentEncoding::from_headers(headers) {
        ContentEncoding::Identity => body,
        ContentEncoding::Gzip => gunzip(&body).unwrap_or_else(|e| {
            warn!(error = %e, "failed to gunzip response body");
            Vec::new()
        }),
        ContentEncoding::Deflate => inflate(&body).unwrap_or_else(|e| {
            warn!(error = %e, "failed to inflate response body");
            Vec::new()
        }),
        ContentEncoding::Unsupported(coding) => {
            warn!(coding = %coding, "unsupported content encoding, dropping body");
            Vec::new()
        }
    }
}

pub fn gunzip(compressed: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(compressed);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Raw deflate (no zlib header).
pub fn inflate(compressed: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(compressed);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}
