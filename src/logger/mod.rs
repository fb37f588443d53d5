//! Logger module
//!
//! Logging helpers for the server:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - Optional file targets

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Until then every line goes
/// to stdout/stderr.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Prefix a message with the local date and time
fn stamp(message: &str) -> String {
    format!("{} {message}", Local::now().format("%Y/%m/%d %H:%M:%S"))
}

fn write_info(message: &str) {
    let line = stamp(message);
    match writer::get() {
        Some(w) => w.write_access(&line),
        None => println!("{line}"),
    }
}

fn write_error(message: &str) {
    let line = stamp(message);
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

/// Access lines carry their own timestamp
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_listening(addr: &SocketAddr) {
    write_info(&format!("server is listening: {addr}"));
}

pub fn log_startup(config: &Config) {
    if let Some(workers) = config.server.workers {
        write_info(&format!("[CONFIG] worker threads: {workers}"));
    } else {
        write_info("[CONFIG] worker threads: default (CPU cores)");
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("[CONFIG] access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("[CONFIG] error log: {path}"));
    }
}

pub fn log_route_registered(path: &str) {
    write_info(&format!("[Route] registered {path}"));
}

pub fn log_route_replaced(path: &str) {
    write_info(&format!("[Route] replaced handler for {path}"));
}

pub fn log_reply_failed(err: &std::io::Error) {
    write_error(&format!("cannot reply: {err}"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_fatal(err: &impl std::fmt::Display) {
    write_error(&format!("error: {err}"));
}

pub fn log_signal(name: &str) {
    write_info(&format!("[SIGNAL] {name} received"));
}

pub fn log_shutdown() {
    write_info("shutdown signal received, no longer accepting connections");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
