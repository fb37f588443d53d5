//! Application routes
//!
//! `/ping` is registered as an inline closure, `/echo` as a plain function
//! passed through [`HandlerFunc`]. Both answer `PONG!`.

use hyper::body::Bytes;
use hyper::Request;
use std::io::Write;

use crate::error::Result;
use crate::handler::{Dispatcher, HandlerFunc};
use crate::http::ResponseWriter;
use crate::logger;

pub const PONG: &[u8] = b"PONG!";

/// Reply with the literal `PONG!`
pub fn pong(w: &mut ResponseWriter, _req: &Request<Bytes>) {
    if let Err(e) = w.write_all(PONG) {
        logger::log_reply_failed(&e);
    }
}

/// Build the route table served by the binary
pub fn build() -> Result<Dispatcher> {
    let mut dispatcher = Dispatcher::new();

    dispatcher.handle_func("/ping", |w, _req| {
        if let Err(e) = w.write_all(PONG) {
            logger::log_reply_failed(&e);
        }
    })?;

    dispatcher.handle("/echo", HandlerFunc(pong))?;

    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    fn request(path: &str) -> Request<Bytes> {
        Request::builder().uri(path).body(Bytes::new()).unwrap()
    }

    #[test]
    fn test_ping_replies_pong() {
        let dispatcher = build().unwrap();
        let mut w = ResponseWriter::new(1024);
        dispatcher.dispatch(&mut w, &request("/ping"));
        assert_eq!(w.status(), StatusCode::OK);
        assert_eq!(w.body(), PONG);
    }

    #[test]
    fn test_echo_matches_direct_call() {
        let dispatcher = build().unwrap();
        let req = request("/echo");

        let mut routed = ResponseWriter::new(1024);
        dispatcher.dispatch(&mut routed, &req);

        let mut direct = ResponseWriter::new(1024);
        pong(&mut direct, &req);

        assert_eq!(routed.body(), direct.body());
        assert_eq!(routed.status(), direct.status());
    }

    #[test]
    fn test_missing_route() {
        let dispatcher = build().unwrap();
        let mut w = ResponseWriter::new(1024);
        dispatcher.dispatch(&mut w, &request("/missing"));
        assert_eq!(w.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        // Sink too small for the reply: logged, nothing written, no panic
        let dispatcher = build().unwrap();
        for path in ["/ping", "/echo"] {
            let mut w = ResponseWriter::new(2);
            dispatcher.dispatch(&mut w, &request(path));
            assert!(w.body().is_empty());
            assert_eq!(w.status(), StatusCode::OK);
        }
    }

    #[test]
    fn test_only_two_routes() {
        let dispatcher = build().unwrap();
        assert_eq!(dispatcher.len(), 2);
        assert!(dispatcher.contains("/ping"));
        assert!(dispatcher.contains("/echo"));
    }
}
