//! HTTP protocol layer module
//!
//! Protocol-level helpers (MIME table, response builders, conditional
//! requests), decoupled from the file-serving logic.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_500_response,
    build_file_response, build_options_response, build_redirect_response,
};
