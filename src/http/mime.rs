//! MIME type detection module
//!
//! Maps file extensions to Content-Type values. A curated set of web asset
//! extensions carries explicit values; everything else falls through a stock
//! table of common types, and unknown extensions get the octet-stream
//! default.

/// Content-Type used when no extension mapping exists.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Get the MIME Content-Type for a file extension.
///
/// Lookup is case-insensitive; `None` (no extension) and unmapped
/// extensions return [`DEFAULT_CONTENT_TYPE`].
///
/// # Examples
/// ```
/// use statica::http::mime::content_type;
/// assert_eq!(content_type(Some("js")), "application/javascript");
/// assert_eq!(content_type(Some("HTML")), "text/html");
/// assert_eq!(content_type(None), "application/octet-stream");
/// ```
pub fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some(ext) => lookup(&ext.to_ascii_lowercase()),
        None => DEFAULT_CONTENT_TYPE,
    }
}

/// Static extension table. Expects a lowercased extension without the dot.
fn lookup(extension: &str) -> &'static str {
    match extension {
        // Text
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "txt" | "md" => "text/plain",
        "xml" => "application/xml",

        // JavaScript/JSON/WASM
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "webmanifest" => "application/manifest+json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Documents/archives
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",

        // Default
        _ => DEFAULT_CONTENT_TYPE,
    }
}
