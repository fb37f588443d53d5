//! Request routing dispatch module
//!
//! Exact-path route table. Registration happens once at startup; after that
//! the table is shared read-only between connections.

use hyper::body::Bytes;
use hyper::Request;
use std::collections::HashMap;

use super::{Handler, HandlerFunc};
use crate::error::{Error, Result};
use crate::http::{self, ResponseWriter};
use crate::logger;

/// Maps request paths to handlers
pub struct Dispatcher {
    routes: HashMap<String, Box<dyn Handler>>,
    not_found: Box<dyn Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            not_found: Box::new(HandlerFunc(http::not_found)),
        }
    }

    /// Register `handler` under `path`, replacing any previous handler
    ///
    /// The key is compared against the request's URI path only, so a query
    /// string, fragment or whitespace in `path` is rejected.
    pub fn handle<H>(&mut self, path: &str, handler: H) -> Result<()>
    where
        H: Handler + 'static,
    {
        if !is_valid_path(path) {
            return Err(Error::InvalidPath(path.to_string()));
        }

        if self
            .routes
            .insert(path.to_string(), Box::new(handler))
            .is_some()
        {
            logger::log_route_replaced(path);
        } else {
            logger::log_route_registered(path);
        }
        Ok(())
    }

    /// Register a plain function or closure under `path`
    pub fn handle_func<F>(&mut self, path: &str, f: F) -> Result<()>
    where
        F: Fn(&mut ResponseWriter, &Request<Bytes>) + Send + Sync + 'static,
    {
        self.handle(path, HandlerFunc(f))
    }

    /// Replace the handler used for unregistered paths
    #[must_use]
    pub fn with_not_found<H>(mut self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.not_found = Box::new(handler);
        self
    }

    /// Route one request. Exact match only; anything else goes to the
    /// not-found handler.
    pub fn dispatch(&self, w: &mut ResponseWriter, req: &Request<Bytes>) {
        match self.routes.get(req.uri().path()) {
            Some(handler) => handler.serve_http(w, req),
            None => self.not_found.serve_http(w, req),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn is_valid_path(path: &str) -> bool {
    path.starts_with('/')
        && !path
            .chars()
            .any(|c| c == '?' || c == '#' || c.is_whitespace())
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Dispatcher {
    fn serve_http(&self, w: &mut ResponseWriter, req: &Request<Bytes>) {
        self.dispatch(w, req);
    }
}
