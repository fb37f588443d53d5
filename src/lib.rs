//! Minimal HTTP server built around an exact-path request dispatcher.
//!
//! Handlers implement [`handler::Handler`]; plain functions are adapted with
//! [`handler::HandlerFunc`]. The [`server`] module owns the socket and runs
//! each connection on its own Tokio task.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routes;
pub mod server;

pub use error::{Error, Result};
