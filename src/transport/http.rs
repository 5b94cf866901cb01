use super::TransportError;
use crate::{Error, ErrorContext, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Proxy};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A blocking HTTP client, either direct or routed through one proxy.
///
/// The client has no default timeout; each call passes its own.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    proxied: bool,
}

/// Fully buffered response as it came off the wire.
#[derive(Debug)]
pub struct SentResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub elapsed_millis: i64,
}

impl HttpTransport {
    pub fn direct(user_agent: &str) -> Result<Self> {
        Self::build(user_agent, None)
    }

    pub fn proxied(user_agent: &str, proxy: Proxy) -> Result<Self> {
        Self::build(user_agent, Some(proxy))
    }

    fn build(user_agent: &str, proxy: Option<Proxy>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>);

        let proxied = proxy.is_some();
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client, proxied })
    }

    pub fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// Send the request and return the response with its body still unread.
    ///
    /// `elapsed_millis` covers the exchange up to the response head.
    pub fn dispatch<'a, I>(
        &self,
        method: &str,
        url: &str,
        headers: I,
        body: Option<Vec<u8>>,
        timeout: Duration,
    ) -> Result<(Response, i64)>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let method = parse_method(method)?;
        let url = url::Url::parse(url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid URL: {}", e),
                ErrorContext::new()
                    .with_field_path("url")
                    .with_details(url.to_string()),
            )
        })?;

        let mut request = self
            .client
            .request(method, url)
            .headers(header_map(headers)?);
        if let Some(body) = body {
            request = request.body(body);
        }
        if !timeout.is_zero() {
            request = request.timeout(timeout);
        }

        let started = Instant::now();
        let response = request
            .send()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let elapsed = started.elapsed().as_millis() as i64;
        Ok((response, elapsed))
    }

    /// [`HttpTransport::dispatch`] plus reading the whole body.
    pub fn send<'a, I>(
        &self,
        method: &str,
        url: &str,
        headers: I,
        body: Option<Vec<u8>>,
        timeout: Duration,
    ) -> Result<SentResponse>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let (response, elapsed_millis) = self.dispatch(method, url, headers, body, timeout)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?
            .to_vec();

        Ok(SentResponse {
            status,
            headers,
            body,
            elapsed_millis,
        })
    }
}

fn parse_method(method: &str) -> Result<Method> {
    let method = if method.is_empty() { "GET" } else { method };
    Method::from_bytes(method.as_bytes()).map_err(|_| {
        Error::configuration_with_context(
            "invalid HTTP method",
            ErrorContext::new()
                .with_field_path("method")
                .with_details(method.to_string()),
        )
    })
}

/// Each header is set on its own; a later duplicate name replaces the earlier one.
fn header_map<'a, I>(headers: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            Error::configuration_with_context(
                "invalid header name",
                ErrorContext::new().with_field_path(format!("headers.{}", name)),
            )
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            Error::configuration_with_context(
                "invalid header value",
                ErrorContext::new().with_field_path(format!("headers.{}", name)),
            )
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// One value per header name, keeping the first of repeated headers.
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    for name in headers.keys() {
        if let Some(value) = headers.get(name) {
            flat.insert(canonical_header_name(name.as_str()), header_text(value));
        }
    }
    flat
}

/// One value per header name, repeated values joined with `", "`.
pub fn join_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut joined = BTreeMap::new();
    for name in headers.keys() {
        let values: Vec<String> = headers.get_all(name).iter().map(header_text).collect();
        joined.insert(canonical_header_name(name.as_str()), values.join(", "));
    }
    joined
}

fn header_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

/// `content-encoding` -> `Content-Encoding`.
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_header_name("content-encoding"), "Content-Encoding");
        assert_eq!(canonical_header_name("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_name("etag"), "Etag");
    }

    #[test]
    fn flattening_keeps_first_value() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat.get("Set-Cookie").map(String::as_str), Some("a=1"));
        assert_eq!(flat.get("Content-Type").map(String::as_str), Some("text/plain"));

        let joined = join_headers(&headers);
        assert_eq!(joined.get("Set-Cookie").map(String::as_str), Some("a=1, b=2"));
    }

    #[test]
    fn rejects_bad_method_and_header() {
        assert!(matches!(
            parse_method("GE T"),
            Err(Error::Configuration { .. })
        ));

        let bad = vec![("bad header".to_string(), "v".to_string())];
        assert!(header_map(bad.iter().map(|(k, v)| (k, v))).is_err());
    }
}
