// Application state module
// The state every connection shares, built once at startup.

use std::io;
use std::path::PathBuf;

use super::types::Config;

/// Shared application state
///
/// Immutable after startup: handlers hold it behind an `Arc` and never
/// need a lock.
pub struct AppState {
    pub config: Config,
    /// Canonical absolute path of the served root directory
    pub root: PathBuf,
}

impl AppState {
    /// Build the state, resolving the site root to a canonical path.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = config.resolve_root()?;
        Ok(Self { config, root })
    }
}
