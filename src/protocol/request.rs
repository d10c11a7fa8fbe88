//! Request parsing and encoding

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::Endpoint;
use crate::error::{DirectoryError, Result};
use crate::protocol::{MAX_REQUEST_BYTES, MAX_RESPONSE_BYTES};

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

// == Read Request Head ==
/// Reads a request head until the blank line, EOF, or `MAX_REQUEST_BYTES`.
///
/// There is no timeout; a silent peer blocks this call.
pub async fn read_request_head<R>(reader: &mut R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut head = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.len() >= MAX_REQUEST_BYTES || contains_terminator(&head) {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&head).into_owned())
}

fn contains_terminator(buf: &[u8]) -> bool {
    buf.windows(HEAD_TERMINATOR.len())
        .any(|window| window == HEAD_TERMINATOR)
}

// == Read Response ==
/// Reads a full response until the peer closes the connection.
pub async fn read_response<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut response = Vec::new();
    reader
        .take(MAX_RESPONSE_BYTES)
        .read_to_end(&mut response)
        .await?;
    Ok(response)
}

// == Encode Request ==
/// Builds the request sent to `endpoint` for `path`.
pub fn encode_request(path: &str, endpoint: &Endpoint) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: {endpoint}\r\n\r\n")
}

// == Request Line ==
/// The first line of a request: method, path and protocol token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
    pub protocol: String,
}

impl RequestLine {
    /// Parses the first line of `head`. Header lines are ignored.
    pub fn parse(head: &str) -> Result<Self> {
        let first_line = head.split("\r\n").next().unwrap_or_default();
        let parts: Vec<&str> = first_line.split(' ').collect();

        match parts.as_slice() {
            [method, path, protocol] if !method.is_empty() && path.starts_with('/') => {
                Ok(Self {
                    method: method.to_string(),
                    path: path.to_string(),
                    protocol: protocol.to_string(),
                })
            }
            _ => Err(DirectoryError::Request(format!(
                "invalid request line: {first_line:?}"
            ))),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    /// True for the bare liveness path `/`.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}
