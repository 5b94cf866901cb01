use super::core::HttpClient;
use crate::transport::http::join_headers;
use crate::types::{SoapRequest, SoapResponse};
use crate::Result;
use tracing::{info, warn};

impl HttpClient {
    /// POST an XML envelope. No caching and no body decoding.
    pub fn soap_call(&self, request: &SoapRequest) -> Result<SoapResponse> {
        info!(url = %request.url, "SOAP ->");
        let sent = match self.direct.send(
            "POST",
            &request.url,
            &request.headers,
            Some(request.body.clone().into_bytes()),
            request.timeout,
        ) {
            Ok(sent) => sent,
            Err(e) => {
                warn!(url = %request.url, error = %e, "error making SOAP request");
                return Err(e);
            }
        };

        let response = SoapResponse {
            elapsed_millis: sent.elapsed_millis,
            status_code: sent.status,
            headers: join_headers(&sent.headers),
            body: String::from_utf8_lossy(&sent.body).into_owned(),
        };

        if request.log_body {
            info!(elapsed_ms = response.elapsed_millis, status = response.status_code, url = %request.url, body = %response.body, "SOAP <-");
        } else {
            info!(elapsed_ms = response.elapsed_millis, status = response.status_code, url = %request.url, "SOAP <-");
        }
        Ok(response)
    }
}
