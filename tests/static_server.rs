//! End-to-end tests over real sockets.
//!
//! Each test builds a site tree under the system temp directory, runs the
//! real accept loop on an ephemeral port, and speaks raw HTTP/1.1 over
//! `TcpStream`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;

use statica::config::{
    AppState, Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig,
};
use statica::server;

static SITE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn build_site() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "statica-e2e-{}-{}",
        std::process::id(),
        SITE_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(dir.join("sub")).unwrap();
    std::fs::create_dir_all(dir.join("empty")).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(dir.join("app.js"), "console.log('hi');").unwrap();
    std::fs::write(dir.join("data.unknownext"), "opaque").unwrap();
    std::fs::write(dir.join("photo.JPG"), "not really a jpeg").unwrap();
    std::fs::write(dir.join("small.txt"), "tiny").unwrap();
    std::fs::write(dir.join("large.bin"), vec![0x5a_u8; 8 * 1024 * 1024]).unwrap();
    std::fs::write(dir.join("sub/index.html"), "<h1>sub</h1>").unwrap();
    dir
}

fn test_config(root: PathBuf) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: None,
        },
        site: SiteConfig {
            root: Some(root),
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
        },
        logging: LoggingConfig {
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        },
    }
}

async fn start_server(root: PathBuf) -> (SocketAddr, Arc<Notify>) {
    let state = Arc::new(AppState::new(test_config(root)).expect("state"));
    let listener = server::create_listener("127.0.0.1:0".parse().unwrap()).expect("bind");
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Notify::new());
    tokio::spawn(server::run(listener, state, Arc::clone(&shutdown)));
    (addr, shutdown)
}

fn get(path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n")
}

/// Send a raw request and split the response into status, lowercased
/// header block, and body bytes.
async fn send_request(addr: SocketAddr, request: &str) -> (u16, String, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(request.as_bytes()).await.expect("write");
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.expect("read");

    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator");
    let head = String::from_utf8_lossy(&response[..split]).to_lowercase();
    let body = response[split + 4..].to_vec();
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .expect("status code");
    (status, head, body)
}

#[tokio::test]
async fn test_serves_file_with_mapped_content_type() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, head, body) = send_request(addr, &get("/app.js")).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: application/javascript"));
    assert!(head.contains(&format!("content-length: {}", body.len())));
    assert_eq!(body, b"console.log('hi');");
}

#[tokio::test]
async fn test_unmapped_extension_falls_back_to_octet_stream() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, head, body) = send_request(addr, &get("/data.unknownext")).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: application/octet-stream"));
    assert_eq!(body, b"opaque");
}

#[tokio::test]
async fn test_extension_lookup_is_case_insensitive() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, head, _body) = send_request(addr, &get("/photo.JPG")).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: image/jpeg"));
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, _head, _body) = send_request(addr, &get("/does-not-exist.xyz")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let (addr, _shutdown) = start_server(build_site()).await;
    for path in ["/../../etc/passwd", "/sub/../../../../etc/passwd"] {
        let (status, _head, body) = send_request(addr, &get(path)).await;
        assert_ne!(status, 200, "{path} must not be served");
        assert!(
            !body.windows(5).any(|w| w == b"root:"),
            "{path} leaked file content"
        );
    }
}

#[tokio::test]
async fn test_directory_without_slash_redirects() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, head, _body) = send_request(addr, &get("/sub")).await;
    assert_eq!(status, 301);
    assert!(head.contains("location: /sub/"));
}

#[tokio::test]
async fn test_directory_serves_index_file() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, head, body) = send_request(addr, &get("/sub/")).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: text/html"));
    assert_eq!(body, b"<h1>sub</h1>");

    let (status, _head, body) = send_request(addr, &get("/")).await;
    assert_eq!(status, 200);
    assert_eq!(body, b"<h1>home</h1>");
}

#[tokio::test]
async fn test_directory_without_index_is_404() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let (status, _head, _body) = send_request(addr, &get("/empty/")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_head_returns_headers_without_body() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let request = "HEAD /app.js HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n";
    let (status, head, body) = send_request(addr, request).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: application/javascript"));
    assert!(head.contains("content-length: 18"));
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_if_modified_since_answers_304() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let request = "GET /app.js HTTP/1.1\r\nHost: test\r\n\
                   If-Modified-Since: Fri, 01 Jan 2100 00:00:00 GMT\r\n\
                   Connection: close\r\n\r\n";
    let (status, _head, body) = send_request(addr, request).await;
    assert_eq!(status, 304);
    assert!(body.is_empty());

    // A stale validator still gets the full file
    let request = "GET /app.js HTTP/1.1\r\nHost: test\r\n\
                   If-Modified-Since: Mon, 01 Jan 1990 00:00:00 GMT\r\n\
                   Connection: close\r\n\r\n";
    let (status, _head, body) = send_request(addr, request).await;
    assert_eq!(status, 200);
    assert_eq!(body, b"console.log('hi');");
}

#[tokio::test]
async fn test_disallowed_method_is_405() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let request = "POST / HTTP/1.1\r\nHost: test\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    let (status, head, _body) = send_request(addr, request).await;
    assert_eq!(status, 405);
    assert!(head.contains("allow: get, head, options"));
}

#[tokio::test]
async fn test_options_is_204() {
    let (addr, _shutdown) = start_server(build_site()).await;
    let request = "OPTIONS / HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n";
    let (status, head, _body) = send_request(addr, request).await;
    assert_eq!(status, 204);
    assert!(head.contains("allow: get, head, options"));
}

#[tokio::test]
async fn test_slow_transfer_does_not_block_other_requests() {
    let (addr, _shutdown) = start_server(build_site()).await;

    // Start a large transfer and stop reading after the first bytes; TCP
    // backpressure keeps it in flight on the server.
    let mut slow = TcpStream::connect(addr).await.expect("connect");
    slow.write_all(get("/large.bin").as_bytes()).await.expect("write");
    let mut buf = [0_u8; 1024];
    slow.read_exact(&mut buf).await.expect("first chunk");

    let (status, _head, body) =
        tokio::time::timeout(Duration::from_secs(2), send_request(addr, &get("/small.txt")))
            .await
            .expect("small request stalled behind the large transfer");
    assert_eq!(status, 200);
    assert_eq!(body, b"tiny");
}

#[tokio::test]
async fn test_shutdown_stops_accepting_connections() {
    let (addr, shutdown) = start_server(build_site()).await;
    let (status, _head, _body) = send_request(addr, &get("/small.txt")).await;
    assert_eq!(status, 200);

    shutdown.notify_one();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(
        TcpStream::connect(addr).await.is_err(),
        "listener still accepting after shutdown"
    );
}

#[tokio::test]
async fn test_occupied_port_fails_to_bind() {
    let first = server::create_listener("127.0.0.1:0".parse().unwrap()).expect("first bind");
    let addr = first.local_addr().unwrap();
    assert!(server::create_listener(addr).is_err());
}
