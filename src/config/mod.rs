// Configuration module entry point
// Layered loading (defaults < optional file < environment) and the shared
// immutable application state.

mod state;
mod types;

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

/// Default config file name (extension resolved by the config crate)
const CONFIG_FILE: &str = "statica";

impl Config {
    /// Load configuration from the default sources.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file path (without extension).
    ///
    /// Precedence, lowest to highest: built-in defaults, the config file
    /// (optional), then the `HOST` and `PORT` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5173)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations that cannot produce a working listener.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.port == 0 {
            return Err(config::ConfigError::Message(
                "server.port must be between 1 and 65535 (PORT=0 is not a valid listen port)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the configured host and port to a socket address.
    ///
    /// Accepts IP literals and hostnames; the first resolved address wins.
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        let authority = format!("{}:{}", self.server.host, self.server.port);
        authority.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{authority} did not resolve to any address"),
            )
        })
    }

    /// Resolve the site root to an absolute canonical path.
    ///
    /// Defaults to the directory the server executable lives in, mirroring
    /// the classic "serve the files next to me" deployment. Fails when the
    /// directory does not exist, so startup surfaces the problem instead of
    /// answering 404 for everything.
    pub fn resolve_root(&self) -> io::Result<PathBuf> {
        let root = match &self.site.root {
            Some(path) => path.clone(),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent()
                    .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
            }
        };
        root.canonicalize()
    }
}
