// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::ServeSettings;
use crate::error::Result;
use crate::handler::Dispatcher;
use crate::logger;

/// Serve `dispatcher` on `listener` until `shutdown` completes.
///
/// Accept errors are logged and the loop keeps going. Connections already in
/// flight finish on their own tasks after the loop returns.
pub async fn serve<F>(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    settings: ServeSettings,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let local_addr = listener.local_addr()?;
    logger::log_listening(&local_addr);

    let settings = Arc::new(settings);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => handle_connection(
                        stream,
                        peer_addr,
                        Arc::clone(&dispatcher),
                        Arc::clone(&settings),
                    ),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
