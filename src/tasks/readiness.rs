//! Readiness Check
//!
//! Polls each service until it accepts a connection and answers the
//! liveness request with a non-empty reply.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::config::{Config, Endpoint};
use crate::error::Result;
use crate::protocol::encode_request;

// == Check ==
/// Sends `GET /` to `endpoint` once.
///
/// Returns `Ok(true)` if the service replied with at least one byte.
pub async fn check(endpoint: &Endpoint) -> Result<bool> {
    let mut stream = TcpStream::connect(endpoint.address()).await?;
    stream
        .write_all(encode_request("/", endpoint).as_bytes())
        .await?;

    let mut buf = [0u8; 1024];
    let n = stream.read(&mut buf).await?;
    Ok(n > 0)
}

// == Wait For Service ==
/// Blocks until `endpoint` is ready, retrying every `interval`.
pub async fn wait_for_service(name: &str, endpoint: &Endpoint, interval: Duration) {
    loop {
        match check(endpoint).await {
            Ok(true) => {
                info!("{} server is up and running on {}", name, endpoint);
                return;
            }
            Ok(false) => debug!("{} server on {} closed without replying", name, endpoint),
            Err(e) => debug!("waiting for {} server on {}: {}", name, endpoint, e),
        }
        tokio::time::sleep(interval).await;
    }
}

// == Wait For All ==
/// Waits for the Instagram backend, the WhatsApp backend and the gateway,
/// in that order.
pub async fn wait_for_all(config: &Config) {
    let interval = Duration::from_millis(config.readiness_interval_ms);

    wait_for_service("Instagram", &config.instagram, interval).await;
    wait_for_service("WhatsApp", &config.whatsapp, interval).await;
    wait_for_service("Http", &config.gateway, interval).await;

    info!("All servers are up and running. Ready to accept requests.");
}
