//! HTTP protocol layer module
//!
//! The response sink handlers write into and the responses the server
//! produces on its own (not found, oversized body).

pub mod response;
mod writer;

pub use response::{
    build_400_response, build_413_response, not_found, set_server_header, NOT_FOUND_BODY,
};
pub use writer::ResponseWriter;
