//! Static file serving module
//!
//! Maps request paths to files under the site root and builds the
//! response: traversal protection, directory handling, conditional GET,
//! and MIME type detection.

use crate::config::AppState;
use crate::handler::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of mapping a request path onto the filesystem
#[derive(Debug)]
enum Resolution {
    /// A regular file to serve (canonical path)
    File(PathBuf),
    /// Directory requested without a trailing slash
    Redirect(String),
    NotFound,
}

/// Serve a request path from the site root.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve_path(ctx.path, &state.root, &state.config.site.index_files) {
        Resolution::File(path) => serve_resolved_file(&path, ctx).await,
        Resolution::Redirect(location) => http::build_redirect_response(&location),
        Resolution::NotFound => http::build_404_response(),
    }
}

/// Map a request path to a file under `root`.
///
/// Traversal protection is enforced in two layers: any `..` segment in the
/// request is rejected outright, and the resolved path is canonicalized and
/// must stay inside the canonical root (which also catches symlink
/// escapes). Directories without a trailing slash redirect; with one, the
/// first existing index file is served, or nothing.
fn resolve_path(request_path: &str, root: &Path, index_files: &[String]) -> Resolution {
    let relative = request_path.trim_start_matches('/');

    if relative.split('/').any(|segment| segment == "..") {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path}"
        ));
        return Resolution::NotFound;
    }

    let mut target = root.join(relative);

    if target.is_dir() {
        if !request_path.ends_with('/') {
            return Resolution::Redirect(format!("{request_path}/"));
        }
        let Some(index) = index_files
            .iter()
            .map(|name| target.join(name))
            .find(|candidate| candidate.is_file())
        else {
            return Resolution::NotFound;
        };
        target = index;
    }

    // Missing files fail canonicalization here; that is the ordinary 404.
    let Ok(canonical) = target.canonicalize() else {
        return Resolution::NotFound;
    };

    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path escapes root, blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return Resolution::NotFound;
    }

    if !canonical.is_file() {
        return Resolution::NotFound;
    }

    Resolution::File(canonical)
}

/// Serve a resolved regular file: conditional GET, then full read.
async fn serve_resolved_file(path: &Path, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let modified = fs::metadata(path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok());

    if let Some(mtime) = modified {
        if cache::not_modified(ctx.if_modified_since.as_deref(), mtime) {
            return http::build_304_response(&cache::format_http_date(mtime));
        }
    }

    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type(path.extension().and_then(|e| e.to_str()));
            let last_modified = modified.map(cache::format_http_date);
            http::build_file_response(
                Bytes::from(content),
                content_type,
                last_modified.as_deref(),
                ctx.is_head,
            )
        }
        // The file was resolved but vanished before the read
        Err(e) if e.kind() == io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ));
            http::build_500_response()
        }
    }
}
