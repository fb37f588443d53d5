// Configuration module entry point
// Layers built-in defaults, an optional config file and environment overrides

mod types;

pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Config file looked up when no path is given (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "lattice";

/// Prefix of environment overrides, e.g. `LATTICE_SERVER__PORT`
pub const ENV_PREFIX: &str = "LATTICE";

impl Config {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables such as
    /// `LATTICE_SERVER__PORT=9090` override both file and defaults.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, env_source())
    }

    fn load_with_env(
        config_path: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("http.server_name", "lattice")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("http.max_response_size", 10_485_760)? // 10MB
            .set_default("performance.keep_alive", true)?
            // 0 = connections live as long as the client keeps them open
            .set_default("performance.connection_timeout", 0)?
            .build()?;

        settings.try_deserialize()
    }

    /// `host:port` string handed to the resolver
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
