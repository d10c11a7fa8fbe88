//! Protocol Module
//!
//! Minimal line-oriented request/response wire format shared by the
//! gateway, the backends and the readiness check.
//!
//! # Request
//! `GET /<path> <protocol>\r\nHost: <host>:<port>\r\n\r\n`; only the method
//! and path are interpreted.
//!
//! # Responses
//! - `200 OK` with a handle, aggregate lines, or an empty liveness body
//! - `404 Not Found` with an empty body
//! - `405 Method Not Allowed` for any non-GET method
//! - `302 Found` with a `Location` line (WhatsApp redirect)

pub mod request;
pub mod response;

pub use request::{encode_request, read_request_head, read_response, RequestLine};
pub use response::Response;

// == Public Constants ==
/// Largest request head read from a client
pub const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// Largest backend response relayed by the gateway
pub const MAX_RESPONSE_BYTES: u64 = 64 * 1024;
