//! reqcache — 执行 curl 命令并缓存响应的命令行工具
//!
//! Usage:
//!   reqcache curl "<command>" [--cache-ttl <secs>] [--read-cache] [--include]
//!   reqcache fingerprint "<command>"
//!   reqcache download <url> <dest>
//!   reqcache version

use reqcache::{HttpClient, RequestConfig};
use std::collections::HashMap;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "curl" => cmd_curl(&args[2..]),
        "fingerprint" => cmd_fingerprint(&args[2..]),
        "download" => cmd_download(&args[2..]),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        r#"reqcache — run curl commands with an on-disk response cache

USAGE:
    reqcache <COMMAND> [OPTIONS]

COMMANDS:
    curl "<command>" [--cache-ttl <secs>] [--read-cache] [--include]
                                Parse and execute a curl command, print the body
    fingerprint "<command>"     Print the cache key of a curl command
    download <url> <dest>       Save a URL to a file
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    REQCACHE_CACHE_DIR          Cache directory (default: http-cache)
    REQCACHE_USER_AGENT         User-Agent for downloads and requests
    REQCACHE_PROXY_URL          Proxy used for commands with a Proxy header
    RUST_LOG                    Log filter (default: info)"#
    );
}

fn cmd_version() {
    println!("reqcache {}", env!("CARGO_PKG_VERSION"));
}

fn parse_command(args: &[String]) -> reqcache::Result<RequestConfig> {
    let command = args.first().ok_or_else(|| {
        reqcache::Error::configuration("missing curl command argument")
    })?;
    reqcache::parse_curl_command(command)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn cmd_curl(args: &[String]) -> reqcache::Result<()> {
    let mut request = parse_command(args)?;

    if let Some(ttl) = flag_value(args, "--cache-ttl") {
        let ttl = ttl.parse::<i64>().map_err(|_| {
            reqcache::Error::configuration(format!("invalid --cache-ttl value: {ttl}"))
        })?;
        request = request.with_cache(ttl);
    }
    if args.iter().any(|a| a == "--read-cache") {
        request = request.with_read_cache(true);
    }

    let client = HttpClient::new()?;
    let record = client.execute(&request)?;

    let mut stdout = std::io::stdout().lock();
    if args.iter().any(|a| a == "--include") {
        writeln!(stdout, "HTTP {}", record.status_code)?;
        for (name, value) in &record.headers {
            writeln!(stdout, "{name}: {value}")?;
        }
        if record.served_from_cache {
            writeln!(stdout, "X-Reqcache: hit")?;
        }
        writeln!(stdout)?;
    }
    stdout.write_all(&record.body)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_fingerprint(args: &[String]) -> reqcache::Result<()> {
    let request = parse_command(args)?;
    println!("{}", request.fingerprint());
    Ok(())
}

fn cmd_download(args: &[String]) -> reqcache::Result<()> {
    let (url, dest) = match (args.first(), args.get(1)) {
        (Some(url), Some(dest)) => (url, dest),
        _ => {
            return Err(reqcache::Error::configuration(
                "usage: reqcache download <url> <dest>",
            ))
        }
    };

    let client = HttpClient::new()?;
    let record = client.download(url, &HashMap::new(), dest, None)?;
    println!(
        "saved {} -> {} ({} ms)",
        url, dest, record.elapsed_millis
    );
    Ok(())
}
