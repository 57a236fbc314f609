//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

/// Largest request body accepted by `/upload` (100 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 << 20;

/// Startup configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,

    /// Directory holding the upload page and other static assets
    pub static_dir: PathBuf,

    /// Request body ceiling in bytes
    pub max_body_bytes: usize,

    /// Convert multi-file uploads in parallel
    pub parallel: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: PathBuf::from("./static"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            parallel: true,
        }
    }
}

impl ServerConfig {
    /// Build a config from `IMGCONV_*` environment variables, keeping defaults
    /// for anything unset or unparsable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = parse_var(&lookup, "IMGCONV_ADDR") {
            config.addr = addr;
        }
        if let Some(dir) = lookup("IMGCONV_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(limit) = parse_var(&lookup, "IMGCONV_MAX_BODY_BYTES") {
            config.max_body_bytes = limit;
        }
        if let Some(parallel) = parse_var(&lookup, "IMGCONV_PARALLEL") {
            config.parallel = parallel;
        }

        config
    }
}

fn parse_var<T: std::str::FromStr>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring invalid {}={:?}: {}", key, raw, e);
            None
        }
    }
}
