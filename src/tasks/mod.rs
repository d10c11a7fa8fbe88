//! Tasks Module
//!
//! Operational helpers that run alongside the services.

pub mod readiness;

pub use readiness::{check, wait_for_all, wait_for_service};
