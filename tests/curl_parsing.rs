//! Table tests for curl command parsing.

use reqcache::{parse_curl_command, Error, RequestConfig};
use std::collections::HashMap;
use std::time::Duration;

struct Case {
    name: &'static str,
    command: &'static str,
    method: &'static str,
    url: &'static str,
    headers: &'static [(&'static str, &'static str)],
    body: Option<&'static str>,
    use_proxy: bool,
}

fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_parse_curl_commands() {
    let cases = [
        Case {
            name: "basic GET",
            command: "curl https://example.com",
            method: "GET",
            url: "https://example.com",
            headers: &[],
            body: None,
            use_proxy: false,
        },
        Case {
            name: "POST with header and body",
            command: r#"curl -X POST https://example.com -H "Content-Type: application/json" --data '{"key":"value"}'"#,
            method: "POST",
            url: "https://example.com",
            headers: &[("Content-Type", "application/json")],
            body: Some(r#"{"key":"value"}"#),
            use_proxy: false,
        },
        Case {
            name: "quoted URL with query",
            command: "curl 'https://example.com?key=value'",
            method: "GET",
            url: "https://example.com?key=value",
            headers: &[],
            body: None,
            use_proxy: false,
        },
        Case {
            name: "PUT with custom header",
            command: r#"curl -X PUT https://example.com -H "Authorization: Bearer token""#,
            method: "PUT",
            url: "https://example.com",
            headers: &[("Authorization", "Bearer token")],
            body: None,
            use_proxy: false,
        },
        Case {
            name: "URL-encoded data defaults the content type",
            command: "curl -X POST https://example.com --data-urlencode 'key=value'",
            method: "POST",
            url: "https://example.com",
            headers: &[("Content-Type", "application/x-www-form-urlencoded")],
            body: Some("key=value"),
            use_proxy: false,
        },
        Case {
            name: "repeated data flags are joined with &",
            command: "curl https://example.com --data a=1 --data-urlencode 'b=two words'",
            method: "GET",
            url: "https://example.com",
            headers: &[("Content-Type", "application/x-www-form-urlencoded")],
            body: Some("a=1&b=two words"),
            use_proxy: false,
        },
        Case {
            name: "Proxy header turns on the proxy",
            command: r#"curl -X DELETE https://example.com -H "Proxy: http://proxy.example.com:8080""#,
            method: "DELETE",
            url: "https://example.com",
            headers: &[("Proxy", "http://proxy.example.com:8080")],
            body: None,
            use_proxy: true,
        },
        Case {
            name: "--proxy flag is not interpreted",
            command: "curl https://example.com --proxy socks5://127.0.0.1:9050",
            method: "GET",
            url: "https://example.com",
            headers: &[],
            body: None,
            use_proxy: false,
        },
        Case {
            name: "multi-line command from browser devtools",
            command: "curl 'https://api.example.com/v1/items' \\\n  -H 'accept: application/json' \\\n  --location \\\n  --compressed",
            method: "GET",
            url: "https://api.example.com/v1/items",
            headers: &[("accept", "application/json")],
            body: None,
            use_proxy: false,
        },
    ];

    for case in cases {
        let config = parse_curl_command(case.command)
            .unwrap_or_else(|e| panic!("{}: unexpected error {}", case.name, e));

        assert_eq!(config.method, case.method, "{}: method", case.name);
        assert_eq!(config.url, case.url, "{}: url", case.name);
        assert_eq!(config.headers, headers(case.headers), "{}: headers", case.name);
        assert_eq!(
            config.body.as_deref(),
            case.body.map(str::as_bytes),
            "{}: body",
            case.name
        );
        assert_eq!(config.timeout, Duration::from_secs(30), "{}: timeout", case.name);
        assert_eq!(config.use_proxy, case.use_proxy, "{}: use_proxy", case.name);
        assert!(!config.use_cache && !config.read_cache, "{}: cache flags", case.name);
    }
}

#[test]
fn test_missing_url_is_a_parse_error() {
    let err = parse_curl_command("curl -X GET").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
}

#[test]
fn test_non_curl_input_is_rejected() {
    for input in ["", "   ", "wget https://example.com", "curlhttps://example.com"] {
        assert!(
            matches!(parse_curl_command(input), Err(Error::Parse { .. })),
            "{input:?} should not parse"
        );
    }
}

#[test]
fn test_leading_whitespace_is_tolerated() {
    let config = parse_curl_command("\n   curl https://example.com\n").unwrap();
    assert_eq!(config.url, "https://example.com");
}

#[test]
fn test_parsed_commands_fingerprint_like_built_ones() {
    let parsed: RequestConfig = r#"curl -X POST https://example.com -H "B: 2" -H "A: 1" --data x=1"#
        .parse()
        .unwrap();
    let built = RequestConfig::post("https://example.com")
        .with_header("A", "1")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_header("B", "2")
        .with_body("x=1");
    assert_eq!(parsed.fingerprint(), built.fingerprint());
}
