//! Request handler module
//!
//! Defines the single-method [`Handler`] contract, the [`HandlerFunc`]
//! adapter that lets a plain function satisfy it, and the exact-path
//! [`Dispatcher`] that routes requests to registered handlers.

pub mod router;

use hyper::body::Bytes;
use hyper::Request;

use crate::http::ResponseWriter;

pub use router::Dispatcher;

/// Anything that can answer one request by writing into a [`ResponseWriter`]
///
/// Handlers run concurrently on the runtime's worker threads, hence the
/// `Send + Sync` bound.
pub trait Handler: Send + Sync {
    fn serve_http(&self, w: &mut ResponseWriter, req: &Request<Bytes>);
}

/// Adapter turning an ordinary function or closure into a [`Handler`]
///
/// ```
/// use hyper::body::Bytes;
/// use hyper::Request;
/// use lattice::handler::{Handler, HandlerFunc};
/// use lattice::http::ResponseWriter;
/// use std::io::Write;
///
/// fn hello(w: &mut ResponseWriter, _req: &Request<Bytes>) {
///     let _ = w.write_all(b"hello");
/// }
///
/// let handler = HandlerFunc(hello);
/// let mut w = ResponseWriter::new(64);
/// handler.serve_http(&mut w, &Request::new(Bytes::new()));
/// assert_eq!(w.body(), b"hello");
/// ```
#[derive(Clone, Copy)]
pub struct HandlerFunc<F>(pub F);

impl<F> Handler for HandlerFunc<F>
where
    F: Fn(&mut ResponseWriter, &Request<Bytes>) + Send + Sync,
{
    fn serve_http(&self, w: &mut ResponseWriter, req: &Request<Bytes>) {
        (self.0)(w, req);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn greet(w: &mut ResponseWriter, req: &Request<Bytes>) {
        let _ = write!(w, "hello from {}", req.uri().path());
    }

    #[test]
    fn test_adapter_matches_direct_call() {
        let req = Request::builder().uri("/greet").body(Bytes::new()).unwrap();

        let mut direct = ResponseWriter::new(64);
        greet(&mut direct, &req);

        let mut adapted = ResponseWriter::new(64);
        HandlerFunc(greet).serve_http(&mut adapted, &req);

        assert_eq!(direct.body(), adapted.body());
        assert_eq!(direct.status(), adapted.status());
    }

    #[test]
    fn test_adapter_wraps_closure() {
        let handler = HandlerFunc(|w: &mut ResponseWriter, _: &Request<Bytes>| {
            w.write_header(hyper::StatusCode::ACCEPTED);
        });
        let mut w = ResponseWriter::new(64);
        handler.serve_http(&mut w, &Request::new(Bytes::new()));
        assert_eq!(w.status(), hyper::StatusCode::ACCEPTED);
    }

    #[test]
    fn test_adapter_is_object_safe() {
        let handlers: Vec<Box<dyn Handler>> = vec![Box::new(HandlerFunc(greet))];
        let mut w = ResponseWriter::new(64);
        let req = Request::builder().uri("/boxed").body(Bytes::new()).unwrap();
        handlers[0].serve_http(&mut w, &req);
        assert_eq!(w.body(), b"hello from /boxed");
    }
}
