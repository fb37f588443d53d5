//! Crate error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Route paths are matched exactly and must be absolute
    #[error("invalid route path '{0}': must start with '/' and contain no query, fragment or whitespace")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("could not resolve listen address '{0}'")]
    Resolve(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
