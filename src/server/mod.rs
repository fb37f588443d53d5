// Server module entry point
// Listener creation, the accept loop and per-connection serving

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

use std::time::Duration;

use crate::config::Config;

pub use listener::{bind, create_listener, resolve};
pub use server_loop::serve;
pub use signal::shutdown_signal;

/// Per-connection settings derived from [`Config`]
#[derive(Debug, Clone)]
pub struct ServeSettings {
    pub server_name: String,
    pub max_body_size: u64,
    pub max_response_size: usize,
    pub keep_alive: bool,
    /// Zero disables the timeout
    pub connection_timeout: Duration,
    pub access_log: bool,
    pub access_log_format: String,
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            server_name: "lattice".to_string(),
            max_body_size: 1_048_576,
            max_response_size: 10_485_760,
            keep_alive: true,
            connection_timeout: Duration::ZERO,
            access_log: false,
            access_log_format: "common".to_string(),
        }
    }
}

impl From<&Config> for ServeSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            server_name: cfg.http.server_name.clone(),
            max_body_size: cfg.http.max_body_size,
            max_response_size: cfg.http.max_response_size,
            keep_alive: cfg.performance.keep_alive,
            connection_timeout: Duration::from_secs(cfg.performance.connection_timeout),
            access_log: cfg.logging.access_log,
            access_log_format: cfg.logging.access_log_format.clone(),
        }
    }
}
