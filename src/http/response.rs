//! HTTP response building module
//!
//! Responses produced by the server itself rather than by a registered
//! handler.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, SERVER, X_CONTENT_TYPE_OPTIONS};
use hyper::{Request, Response, StatusCode};
use std::io::Write;

use super::ResponseWriter;
use crate::logger;

pub const NOT_FOUND_BODY: &str = "404 page not found\n";

fn full(text: &'static str) -> Full<Bytes> {
    Full::new(Bytes::from_static(text.as_bytes()))
}

/// Reply with 404 for paths that have no registered handler
pub fn not_found(w: &mut ResponseWriter, _req: &Request<Bytes>) {
    let headers = w.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    w.write_header(StatusCode::NOT_FOUND);
    if let Err(e) = w.write_all(NOT_FOUND_BODY.as_bytes()) {
        logger::log_reply_failed(&e);
    }
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(full("413 Payload Too Large\n"))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(full("413 Payload Too Large\n"))
        })
}

/// Build 400 Bad Request response for bodies that could not be read
pub fn build_400_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(full("400 Bad Request\n"))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(full("400 Bad Request\n"))
        })
}

/// Stamp the `Server` header onto an outgoing response
pub fn set_server_header(response: &mut Response<Full<Bytes>>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!("invalid server name '{server_name}': {e}")),
    }
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
