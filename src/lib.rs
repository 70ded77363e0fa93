//! statica
//!
//! A minimal static-file HTTP server: binds a host/port, serves files from
//! a fixed root directory, and maps file extensions to content types.
//! Built on tokio and hyper with one task per connection; configuration and
//! the served root are immutable once the server starts.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
