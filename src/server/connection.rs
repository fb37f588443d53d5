// Connection handling module
// Serves one TCP connection and turns each request into a dispatcher call

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, Uri, Version};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::ServeSettings;
use crate::handler::Dispatcher;
use crate::http::{self, ResponseWriter};
use crate::logger::{self, AccessLogEntry};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Serve a single connection on its own task.
///
/// Connection-level failures (client hang-up, malformed requests, timeout)
/// are logged and never reach the accept loop.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    settings: Arc<ServeSettings>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = settings.connection_timeout;

        let mut builder = http1::Builder::new();
        builder.keep_alive(settings.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let dispatcher = Arc::clone(&dispatcher);
                let settings = Arc::clone(&settings);
                async move {
                    Ok::<_, Infallible>(handle_request(req, peer_addr, &dispatcher, &settings).await)
                }
            }),
        );

        if timeout.is_zero() {
            if let Err(err) = conn.await {
                logger::log_connection_error(&err);
            }
            return;
        }

        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            )),
        }
    });
}

/// Read the body, run the dispatcher and finish the response
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    dispatcher: &Dispatcher,
    settings: &ServeSettings,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let mut response = match read_request(req, settings.max_body_size).await {
        Ok(req) => {
            let mut w = ResponseWriter::new(settings.max_response_size);
            dispatcher.dispatch(&mut w, &req);
            w.into_response()
        }
        Err(rejection) => rejection,
    };

    http::set_server_header(&mut response, &settings.server_name);

    if settings.access_log {
        let entry = access_entry(peer_addr, &method, &uri, version, &response, started.elapsed());
        logger::log_access(&entry, &settings.access_log_format);
    }

    response
}

/// Collect the request body, enforcing the configured size limit
async fn read_request<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<Request<Bytes>, Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if let Some(size) = declared_length(&req) {
        if size > max_body_size {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            return Err(http::build_413_response());
        }
    }

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);

    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(Request::from_parts(parts, collected.to_bytes())),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_error(&format!(
                "Request body exceeded {max_body_size} bytes while reading"
            ));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response())
        }
    }
}

/// Content-Length as sent by the client, if present and valid
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    let value = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    match value.to_str().ok().and_then(|v| v.parse::<u64>().ok()) {
        Some(size) => Some(size),
        None => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: {value:?}, skipping size check"
            ));
            None
        }
    }
}

fn access_entry(
    peer_addr: SocketAddr,
    method: &Method,
    uri: &Uri,
    version: Version,
    response: &Response<Full<Bytes>>,
    elapsed: Duration,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        uri.path().to_string(),
    );
    entry.query = uri.query().map(ToString::to_string);
    entry.http_version = version_label(version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.request_time_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else {
        "1.1"
    }
}
