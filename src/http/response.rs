//! HTTP response building module
//!
//! Provides builders for the status codes the server answers with,
//! decoupled from the file-serving logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = concat!("statica/", env!("CARGO_PKG_VERSION"));

/// Build a 200 OK response carrying file contents.
///
/// `Content-Length` always reflects the full file size; for HEAD requests
/// the body is emptied but the headers stay identical to the GET response.
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Server", SERVER_NAME)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length);

    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build a 304 Not Modified response for a conditional request.
pub fn build_304_response(last_modified: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("Server", SERVER_NAME)
        .header("Last-Modified", last_modified)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 301 Moved Permanently response (trailing-slash directory
/// redirects).
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Server", SERVER_NAME)
        .header("Location", location)
        .header("Content-Type", "text/plain")
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 Not Found response.
pub fn build_404_response() -> Response<Full<Bytes>> {
    const BODY: &str = "404 Not Found";
    Response::builder()
        .status(404)
        .header("Server", SERVER_NAME)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .body(Full::new(Bytes::from(BODY)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(BODY)))
        })
}

/// Build a 405 Method Not Allowed response.
pub fn build_405_response() -> Response<Full<Bytes>> {
    const BODY: &str = "405 Method Not Allowed";
    Response::builder()
        .status(405)
        .header("Server", SERVER_NAME)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from(BODY)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from(BODY)))
        })
}

/// Build a 500 Internal Server Error response.
pub fn build_500_response() -> Response<Full<Bytes>> {
    const BODY: &str = "500 Internal Server Error";
    Response::builder()
        .status(500)
        .header("Server", SERVER_NAME)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BODY.len())
        .body(Full::new(Bytes::from(BODY)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(BODY)))
        })
}

/// Build the OPTIONS response (204 plus the allowed method set).
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Server", SERVER_NAME)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log a response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
