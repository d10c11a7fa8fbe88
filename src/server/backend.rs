//! Backend Service
//!
//! Answers lookups for one network (or all of them) from an immutable
//! data store, consulting a bounded response cache first.

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, ResponseCache};
use crate::error::Result;
use crate::models::Query;
use crate::protocol::{read_request_head, RequestLine, Response};
use crate::server::Service;
use crate::store::DataStore;

// == Scope ==
/// Which part of the data store a backend answers from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Network(String),
    All,
}

impl Scope {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Network(network) => network.as_str(),
            Self::All => "all",
        }
    }
}

// == Backend Service ==
/// Owns one data store scope and one response cache.
///
/// The cache lock is held across the whole get/lookup/put sequence, so
/// concurrent identical queries still reach the data store at most once.
#[derive(Debug)]
pub struct BackendService {
    name: String,
    scope: Scope,
    store: Arc<DataStore>,
    cache: Mutex<ResponseCache>,
}

impl BackendService {
    // == Constructors ==
    pub fn new(name: impl Into<String>, scope: Scope, store: Arc<DataStore>) -> Self {
        Self {
            name: name.into(),
            scope,
            store,
            cache: Mutex::new(ResponseCache::new()),
        }
    }

    /// Creates a backend serving a single network, keeping only that
    /// network's table.
    pub fn for_network(name: impl Into<String>, network: &str, store: DataStore) -> Self {
        let network = network.to_lowercase();
        let store = Arc::new(store.scoped(&network));
        Self::new(name, Scope::Network(network), store)
    }

    /// Creates a backend answering across every network.
    pub fn aggregate(name: impl Into<String>, store: Arc<DataStore>) -> Self {
        Self::new(name, Scope::All, store)
    }

    // == Answer ==
    /// Returns the response body for `query`; empty means not found.
    ///
    /// Empty bodies are cached like any other, so a repeated unknown name
    /// is answered from the cache.
    pub async fn answer(&self, query: &Query) -> String {
        let identity_key = query.identity_key();
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.get(&identity_key) {
            info!("{}: query for {} found in cache", self.name, query);
            return cached;
        }
        info!("{}: query for {} not found in cache", self.name, query);

        let body = match &self.scope {
            Scope::Network(network) => self
                .store
                .lookup(network, &query.given_names, &query.last_names)
                .map(str::to_string)
                .unwrap_or_default(),
            Scope::All => self
                .store
                .lookup_all(&query.given_names, &query.last_names)
                .into_iter()
                .map(|(network, handle)| format!("{network},{handle}\r\n"))
                .collect(),
        };

        cache.put(identity_key, body.clone());
        let stats = cache.stats();
        debug!(
            "{}: cache entries={}, lookups={}, not_found={}, hits={}, evictions={}, hit_rate={:.2}",
            self.name,
            stats.total_entries,
            stats.lookups(),
            stats.not_found_stored,
            stats.hits,
            stats.evictions,
            stats.hit_rate()
        );

        body
    }

    /// Returns a snapshot of the response cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    // == Connection Handling ==
    /// Serves one request on `stream`, then closes it.
    ///
    /// Malformed requests are dropped without a response.
    pub async fn handle_connection<S>(&self, mut stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        if let Err(e) = self.serve_request(&mut stream).await {
            warn!("{}: closing connection without response: {}", self.name, e);
        }
    }

    async fn serve_request<S>(&self, stream: &mut S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let head = read_request_head(stream).await?;
        let line = RequestLine::parse(&head)?;

        let response = if !line.is_get() {
            Response::MethodNotAllowed
        } else if line.is_root() {
            Response::Ack
        } else {
            let query = Query::from_backend_path(&line.path, self.scope.as_str())?;
            info!("{}: searching for {}", self.name, query);
            Response::from_body(self.answer(&query).await)
        };

        stream.write_all(&response.to_bytes()).await?;
        stream.shutdown().await?;
        Ok(())
    }
}

impl Service for BackendService {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, stream: TcpStream) -> impl Future<Output = ()> + Send {
        self.handle_connection(stream)
    }
}
