use super::core::HttpClient;
use crate::transport::http::flatten_headers;
use crate::transport::TransportError;
use crate::types::ResponseRecord;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "User-Agent";

impl HttpClient {
    /// Stream a GET response body into `dest`.
    ///
    /// A `User-Agent` in `headers`, in any letter case, wins over
    /// `user_agent` and the configured default.
    ///
    /// `dest` is created before the request is sent. On a non-2xx status or a
    /// failure mid-body the file is left as it is, so an error means the file
    /// may be empty or incomplete. Returns status, headers and timing with an
    /// empty body.
    pub fn download(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        dest: impl AsRef<Path>,
        user_agent: Option<&str>,
    ) -> Result<ResponseRecord> {
        let dest = dest.as_ref();
        let mut file = File::create(dest)?;

        let mut request_headers = headers.clone();
        if !headers.keys().any(|name| name.eq_ignore_ascii_case(USER_AGENT)) {
            request_headers.insert(
                USER_AGENT.to_string(),
                user_agent
                    .filter(|ua| !ua.is_empty())
                    .unwrap_or(&self.config.user_agent)
                    .to_string(),
            );
        }

        debug!(url = %url, dest = %dest.display(), "http -> download");
        let (mut response, elapsed_millis) =
            self.direct
                .dispatch("GET", url, &request_headers, None, Duration::ZERO)?;

        let status = response.status();
        let record = ResponseRecord {
            source_url: url.to_string(),
            method: "GET".to_string(),
            elapsed_millis,
            status_code: status.as_u16(),
            headers: flatten_headers(response.headers()),
            ..Default::default()
        };
        debug!(status = record.status_code, "http <- download");

        if !status.is_success() {
            warn!(url = %url, status = record.status_code, "download failed");
            return Err(Error::Status {
                status: record.status_code,
                url: url.to_string(),
            });
        }

        let written = response
            .copy_to(&mut file)
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        file.flush()?;
        debug!(bytes = written, dest = %dest.display(), "download complete");

        Ok(record)
    }
}
