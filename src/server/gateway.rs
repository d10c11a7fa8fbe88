//! Gateway Router
//!
//! Front-line service: parses each request and, by network token, proxies
//! it to the Instagram backend, redirects the caller to the WhatsApp
//! backend, or answers locally from an aggregate backend.

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{error, info, warn};

use crate::config::Endpoint;
use crate::error::{DirectoryError, Result};
use crate::models::{NetworkToken, Query};
use crate::protocol::{encode_request, read_request_head, read_response, RequestLine, Response};
use crate::server::{BackendService, Service};
use crate::store::DataStore;

// == Dispatch ==
/// Where a parsed query goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Forward to the Instagram backend and relay its raw response
    ProxyToInstagram(Endpoint),
    /// Point the caller at the WhatsApp backend
    RedirectToWhatsApp(Endpoint),
    /// Answer from the embedded aggregate backend
    LocalAllLookup,
}

// == Gateway Router ==
#[derive(Debug)]
pub struct GatewayRouter {
    name: String,
    aggregate: BackendService,
    instagram: Endpoint,
    whatsapp: Endpoint,
}

impl GatewayRouter {
    // == Constructor ==
    /// Creates a gateway linked to the given backends.
    ///
    /// # Arguments
    /// * `name` - Name used in log lines
    /// * `store` - Full data store for the local aggregate lookups
    /// * `instagram` - Address proxied to for `instagram` queries
    /// * `whatsapp` - Address redirected to for `whatsapp` queries
    pub fn new(
        name: impl Into<String>,
        store: Arc<DataStore>,
        instagram: Endpoint,
        whatsapp: Endpoint,
    ) -> Self {
        let name = name.into();
        Self {
            aggregate: BackendService::aggregate(name.clone(), store),
            name,
            instagram,
            whatsapp,
        }
    }

    /// The embedded aggregate backend.
    pub fn aggregate(&self) -> &BackendService {
        &self.aggregate
    }

    // == Route ==
    /// Applies the dispatch table to a network token.
    pub fn route(&self, network: &NetworkToken) -> Dispatch {
        match network {
            NetworkToken::Instagram => Dispatch::ProxyToInstagram(self.instagram.clone()),
            NetworkToken::WhatsApp => Dispatch::RedirectToWhatsApp(self.whatsapp.clone()),
            NetworkToken::All | NetworkToken::Other(_) => Dispatch::LocalAllLookup,
        }
    }

    // == Connection Handling ==
    /// Serves one request on `stream`, then closes it.
    ///
    /// Malformed requests and proxy failures close the connection without
    /// a response.
    pub async fn handle_connection<S>(&self, mut stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        match self.serve_request(&mut stream).await {
            Ok(()) => {}
            Err(e @ DirectoryError::BackendUnavailable { .. }) => {
                error!("{}: proxy failed, dropping connection: {}", self.name, e);
            }
            Err(e) => {
                warn!("{}: closing connection without response: {}", self.name, e);
            }
        }
    }

    async fn serve_request<S>(&self, stream: &mut S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let head = read_request_head(stream).await?;
        let line = RequestLine::parse(&head)?;

        let reply = if !line.is_get() {
            Response::MethodNotAllowed.to_bytes()
        } else if line.is_root() {
            Response::Ack.to_bytes()
        } else {
            let query = Query::from_gateway_path(&line.path)?;
            info!("{}: query is {} query", self.name, query.network);
            self.dispatch(&query).await?
        };

        stream.write_all(&reply).await?;
        stream.shutdown().await?;
        Ok(())
    }

    async fn dispatch(&self, query: &Query) -> Result<Vec<u8>> {
        match self.route(&query.network) {
            Dispatch::ProxyToInstagram(endpoint) => self.proxy(&endpoint, query).await,
            Dispatch::RedirectToWhatsApp(endpoint) => {
                let location = format!("{}/{}", endpoint, query.names_path());
                info!("{}: redirecting to {}", self.name, location);
                Ok(Response::Redirect(location).to_bytes())
            }
            Dispatch::LocalAllLookup => {
                let body = self.aggregate.answer(query).await;
                Ok(Response::from_body(body).to_bytes())
            }
        }
    }

    // == Proxy ==
    /// Forwards `query` over a fresh connection and returns the raw reply.
    ///
    /// Single attempt; the outbound stream is dropped on every exit path.
    async fn proxy(&self, endpoint: &Endpoint, query: &Query) -> Result<Vec<u8>> {
        let unavailable = |source: std::io::Error| DirectoryError::BackendUnavailable {
            address: endpoint.address(),
            source,
        };

        info!("{}: forwarding {} to {}", self.name, query, endpoint);
        let mut backend = TcpStream::connect(endpoint.address())
            .await
            .map_err(unavailable)?;
        backend
            .write_all(encode_request(&query.to_path(), endpoint).as_bytes())
            .await
            .map_err(unavailable)?;

        read_response(&mut backend).await.map_err(unavailable)
    }
}

impl Service for GatewayRouter {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, stream: TcpStream) -> impl Future<Output = ()> + Send {
        self.handle_connection(stream)
    }
}
