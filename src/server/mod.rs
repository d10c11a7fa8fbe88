//! Server Module
//!
//! The per-network backends, the gateway that fronts them, and the accept
//! loop both run on.
//!
//! # Processes
//! - `BackendService` scoped to `instagram` or `whatsapp`
//! - `GatewayRouter` with an embedded aggregate `BackendService`

pub mod backend;
pub mod gateway;
pub mod listener;

pub use backend::{BackendService, Scope};
pub use gateway::{Dispatch, GatewayRouter};
pub use listener::{serve, Service};
