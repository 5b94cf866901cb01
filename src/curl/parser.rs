//! Interpretation of curl tokens into a [`RequestConfig`].

use super::tokenizer::{normalize, tokenize};
use crate::types::RequestConfig;
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use tracing::debug;

const VALID_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Parse a copy-pasted `curl ...` command.
///
/// Only `--location`, `-X/--request`, `-H/--header`, `--data`,
/// `--data-urlencode` and `http...` URLs are understood; every other token is
/// skipped. `use_proxy` is set when the command carries a `Proxy` header.
pub fn parse_curl_command(command: &str) -> Result<RequestConfig> {
    let command = normalize(command);
    if !command.starts_with("curl ") {
        return Err(Error::parse_with_context(
            "not a valid curl command",
            ErrorContext::new()
                .with_details("command must start with `curl `")
                .with_source("curl_parser"),
        ));
    }

    let tokens = tokenize(&command);

    let mut method = String::from("GET");
    let mut url: Option<String> = None;
    let mut headers: HashMap<String, String> = HashMap::new();
    let mut body: Option<Vec<u8>> = None;
    let mut content_type_set = false;

    let mut iter = tokens.iter().skip(1);
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--location" => {}
            "--request" | "-X" => {
                if let Some(next) = iter.next() {
                    let candidate = next.to_uppercase();
                    if VALID_METHODS.contains(&candidate.as_str()) {
                        method = candidate;
                    } else {
                        debug!(method = %next, "ignoring unsupported method");
                    }
                }
            }
            "--header" | "-H" => {
                if let Some(next) = iter.next() {
                    if let Some((name, value)) = next.trim().split_once(':') {
                        let name = name.trim();
                        if name.eq_ignore_ascii_case("content-type") {
                            content_type_set = true;
                        }
                        headers.insert(name.to_string(), value.trim().to_string());
                    }
                }
            }
            "--data" | "--data-urlencode" => {
                if let Some(next) = iter.next() {
                    let data = body.get_or_insert_with(Vec::new);
                    if !data.is_empty() {
                        data.push(b'&');
                    }
                    data.extend_from_slice(strip_quotes(next).as_bytes());

                    if !content_type_set {
                        headers.insert("Content-Type".to_string(), FORM_URLENCODED.to_string());
                        content_type_set = true;
                    }
                }
            }
            other if other.starts_with("http") => {
                url = Some(strip_quotes(other).to_string());
            }
            other => {
                debug!(token = %other, "ignoring curl token");
            }
        }
    }

    let url = url.ok_or_else(|| {
        Error::parse_with_context(
            "URL not found in curl command",
            ErrorContext::new()
                .with_field_path("url")
                .with_source("curl_parser"),
        )
    })?;

    let use_proxy = headers.get("Proxy").is_some_and(|v| !v.is_empty());

    let mut config = RequestConfig::new(method, url);
    config.headers = headers;
    config.body = body;
    config.use_proxy = use_proxy;
    Ok(config)
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '\'' || c == '"')
}

impl std::str::FromStr for RequestConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_curl_command(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_method_is_consumed_but_ignored() {
        let config = parse_curl_command("curl -X FETCH https://example.com").unwrap();
        assert_eq!(config.method, "GET");
        assert_eq!(config.url, "https://example.com");
    }

    #[test]
    fn method_is_upper_cased() {
        let config = parse_curl_command("curl --request patch https://example.com").unwrap();
        assert_eq!(config.method, "PATCH");
    }

    #[test]
    fn explicit_content_type_is_not_overridden() {
        let config = parse_curl_command(
            "curl https://example.com -H 'content-type: text/plain' --data a=1",
        )
        .unwrap();
        assert_eq!(config.headers.get("content-type").map(String::as_str), Some("text/plain"));
        assert!(!config.headers.contains_key("Content-Type"));
    }

    #[test]
    fn header_value_keeps_later_colons() {
        let config =
            parse_curl_command("curl https://example.com -H 'Referer: https://a.b:8080/x'")
                .unwrap();
        assert_eq!(
            config.headers.get("Referer").map(String::as_str),
            Some("https://a.b:8080/x")
        );
    }

    #[test]
    fn header_without_colon_is_dropped() {
        let config = parse_curl_command("curl https://example.com -H nonsense").unwrap();
        assert!(config.headers.is_empty());
    }

    #[test]
    fn last_url_wins() {
        let config = parse_curl_command("curl http://first.example http://second.example").unwrap();
        assert_eq!(config.url, "http://second.example");
    }

    #[test]
    fn requires_curl_prefix() {
        assert!(matches!(
            parse_curl_command("wget https://example.com"),
            Err(Error::Parse { .. })
        ));
        assert!(parse_curl_command("curl").is_err());
    }

    #[test]
    fn from_str_delegates() {
        let config: RequestConfig = "curl https://example.com".parse().unwrap();
        assert_eq!(config.url, "https://example.com");
    }
}
