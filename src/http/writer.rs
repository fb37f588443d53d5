//! Response sink handed to handlers
//!
//! Handlers set the status and headers, then write the body through
//! [`std::io::Write`]. The first body write (or an explicit
//! [`ResponseWriter::write_header`]) commits the status line; later status
//! changes are ignored.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use std::io;

use crate::logger;

const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Buffered response for a single request
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    committed: bool,
    limit: usize,
}

impl ResponseWriter {
    /// Create a writer that accepts at most `limit` body bytes
    pub fn new(limit: usize) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            committed: false,
            limit,
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Set the response status. Only the first call before any body write
    /// takes effect.
    pub fn write_header(&mut self, status: StatusCode) {
        if self.committed {
            logger::log_warning(&format!(
                "superfluous write_header({status}): status already sent as {}",
                self.status
            ));
            return;
        }
        self.status = status;
        self.committed = true;
    }

    /// Convert into the hyper response sent back to the client
    pub fn into_response(mut self) -> Response<Full<Bytes>> {
        if !self.body.is_empty() && !self.headers.contains_key(CONTENT_TYPE) {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        }

        let mut response = Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let total = self.body.len().saturating_add(buf.len());
        if total > self.limit {
            return Err(io::Error::other(format!(
                "response body limit exceeded: {total} > {} bytes",
                self.limit
            )));
        }
        self.committed = true;
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
