use super::core::{into_record, log_response, HttpClient};
use crate::multipart::{MultipartBody, MultipartBuilder};
use crate::types::{FormField, MultipartRequest, RequestConfig, ResponseRecord};
use crate::utils::now_unix;
use crate::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::{debug, warn};

const CONTENT_TYPE: &str = "Content-Type";

impl HttpClient {
    /// Upload ordered text and file fields as multipart/form-data.
    ///
    /// Uploads are never cached and always go out on the direct transport.
    pub fn execute_multipart(&self, request: &MultipartRequest) -> Result<ResponseRecord> {
        let mut builder = MultipartBuilder::new();
        for field in &request.fields {
            builder = match field {
                FormField::Text { name, value } => builder.text(name.as_str(), value.as_str()),
                FormField::File { name, path } => {
                    builder.file(name.as_str(), path, self.fs.as_ref())?
                }
            };
        }
        let body = builder.build();
        let headers = with_content_type(&request.headers, &body);

        debug!(method = %request.method, url = %request.url, parts = request.fields.len(), "http multipart ->");
        let sent = self.direct.send(
            &request.method,
            &request.url,
            &headers,
            Some(body.bytes),
            request.timeout,
        )?;

        let record = into_record(&request.method, &request.url, sent);
        log_response(&record, false);
        Ok(record)
    }

    /// POST plain fields and files (field name -> local path) to `request.url`.
    ///
    /// Fields go out in name order, text fields first. The response body is
    /// read and discarded; status, headers and timing are kept. With
    /// `use_cache` the record is written under the fingerprint of `request`
    /// as given, before the upload headers are added.
    pub fn execute_form(
        &self,
        request: &RequestConfig,
        text_fields: &BTreeMap<String, String>,
        file_fields: &BTreeMap<String, PathBuf>,
    ) -> Result<ResponseRecord> {
        let fingerprint = request.fingerprint();

        let mut builder = MultipartBuilder::new();
        for (name, value) in text_fields {
            builder = builder.text(name.as_str(), value.as_str());
        }
        for (name, path) in file_fields {
            builder = builder.file(name.as_str(), path, self.fs.as_ref())?;
        }
        let body = builder.build();
        let headers = with_content_type(&request.headers, &body);

        let transport = self.transport_for(request)?;
        debug!(url = %request.url, "http form ->");
        let sent = transport.send("POST", &request.url, &headers, Some(body.bytes), request.timeout)?;

        let mut record = into_record("POST", &request.url, sent);
        record.body.clear();

        if request.use_cache {
            record.created_at_unix = now_unix();
            record.cache_ttl_seconds = request.cache_ttl_seconds;
            if let Err(e) = self.cache.put(&fingerprint, &record) {
                warn!(fingerprint = %fingerprint, error = %e, "failed to write cache entry");
            }
        }

        log_response(&record, false);
        Ok(record)
    }
}

/// Copy of `headers` with the multipart `Content-Type` set.
fn with_content_type(headers: &HashMap<String, String>, body: &MultipartBody) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = headers
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    headers.insert(CONTENT_TYPE.to_string(), body.content_type.clone());
    headers
}
