//! Accept Loop
//!
//! Accepts connections and hands each one to its own task.

use std::future::Future;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{info, info_span, warn, Instrument};

use crate::error::Result;

// == Service ==
/// A process that answers exactly one request per connection.
pub trait Service: Send + Sync + 'static {
    /// Name used in every log line of this service.
    fn name(&self) -> &str;

    /// Reads one request from `stream`, answers it (or not), and closes.
    fn handle(&self, stream: TcpStream) -> impl Future<Output = ()> + Send;
}

// == Serve ==
/// Runs the accept loop until the listener fails.
///
/// Each connection gets its own task, so a stalled peer only stalls its
/// own request. Accept errors are logged and the loop keeps going.
pub async fn serve<S: Service>(listener: TcpListener, service: Arc<S>) -> Result<()> {
    let address = listener.local_addr()?;
    info!("{}: listening on {}", service.name(), address);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("{}: accept failed: {}", service.name(), e);
                continue;
            }
        };

        let span = info_span!("connection", service = %service.name(), %peer);
        let service = Arc::clone(&service);
        tokio::spawn(
            async move {
                info!("connection established");
                service.handle(stream).await;
            }
            .instrument(span),
        );
    }
}
