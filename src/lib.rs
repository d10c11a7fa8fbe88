//! Social Directory - person-to-handle lookups across messaging networks
//!
//! A gateway routes each lookup to a per-network backend (by proxy or by
//! redirect) or answers it from an aggregate backend. Every backend keeps
//! a bounded FIFO response cache in front of an immutable data store.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod server;
pub mod store;
pub mod tasks;

pub use config::{Config, Endpoint};
pub use error::{DirectoryError, Result};
pub use server::{serve, BackendService, GatewayRouter};
pub use store::DataStore;
