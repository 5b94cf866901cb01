use super::core::{into_record, log_response, HttpClient};
use crate::cache::CacheLookup;
use crate::types::{RequestConfig, ResponseRecord};
use crate::utils::now_unix;
use crate::Result;
use tracing::{debug, info, warn};

impl HttpClient {
    /// Send a request, consulting and filling the cache as configured.
    ///
    /// With `read_cache`, only a fresh cache entry skips the network; a
    /// missing, expired or unreadable entry falls through to a live fetch.
    /// With `use_cache`, the live response is written back under the request
    /// fingerprint. Write-back failures are logged, never returned.
    pub fn execute(&self, request: &RequestConfig) -> Result<ResponseRecord> {
        let mut fingerprint = None;
        if request.read_cache {
            let fp = request.fingerprint();
            match self.cache.get(&fp) {
                Ok(CacheLookup::Hit(record)) => {
                    info!(method = %request.method, url = %request.url, "http ~cache~");
                    return Ok(record);
                }
                Ok(CacheLookup::Miss) => debug!(fingerprint = %fp, "cache miss"),
                Ok(CacheLookup::Expired) => debug!(fingerprint = %fp, "cache entry expired"),
                Err(e) => warn!(fingerprint = %fp, error = %e, "unreadable cache entry"),
            }
            fingerprint = Some(fp);
        }

        let transport = self.transport_for(request)?;
        if transport.is_proxied() {
            info!(method = %request.method, url = %request.url, "proxied http ->");
        } else {
            info!(method = %request.method, url = %request.url, "http ->");
        }

        let sent = match transport.send(
            &request.method,
            &request.url,
            &request.headers,
            request.body.clone(),
            request.timeout,
        ) {
            Ok(sent) => sent,
            Err(e) => {
                warn!(method = %request.method, url = %request.url, error = %e, "http request failed");
                return Err(e);
            }
        };

        let mut record = into_record(&request.method, &request.url, sent);

        if request.use_cache {
            record.created_at_unix = now_unix();
            record.cache_ttl_seconds = request.cache_ttl_seconds;
            let fp = fingerprint.unwrap_or_else(|| request.fingerprint());
            if let Err(e) = self.cache.put(&fp, &record) {
                warn!(fingerprint = %fp, error = %e, "failed to write cache entry");
            }
        }

        log_response(&record, request.log_response);
        Ok(record)
    }
}
