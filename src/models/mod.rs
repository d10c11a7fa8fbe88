//! Query models shared by the gateway and the backends
//!
//! This module defines the parsed lookup request and the network token
//! that drives gateway dispatch.

pub mod query;

// Re-export commonly used types
pub use query::{NetworkToken, Query};
