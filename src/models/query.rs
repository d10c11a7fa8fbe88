//! Query model
//!
//! A parsed lookup for one person on one network (or on all of them).

use std::fmt;

use crate::error::{DirectoryError, Result};

// == Network Token ==
/// The network a query targets, taken from the first path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkToken {
    Instagram,
    WhatsApp,
    All,
    /// Any unrecognized token; answered like `All` by the gateway
    Other(String),
}

impl NetworkToken {
    /// Parses a path token. Matching is exact: `Instagram` is not
    /// `instagram` and falls through to `Other`.
    pub fn parse(token: &str) -> Self {
        match token {
            "instagram" => Self::Instagram,
            "whatsapp" => Self::WhatsApp,
            "all" => Self::All,
            _ => Self::Other(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Instagram => "instagram",
            Self::WhatsApp => "whatsapp",
            Self::All => "all",
            Self::Other(token) => token.as_str(),
        }
    }
}

impl fmt::Display for NetworkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Query ==
/// A lookup request, scoped to a single request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub network: NetworkToken,
    pub given_names: Vec<String>,
    pub last_names: (String, String),
}

impl Query {
    pub fn new(
        network: NetworkToken,
        given_names: Vec<String>,
        last_names: (String, String),
    ) -> Self {
        Self {
            network,
            given_names,
            last_names,
        }
    }

    // == From Gateway Path ==
    /// Parses `/<network>/<given...>/<lastName1>/<lastName2>`.
    pub fn from_gateway_path(path: &str) -> Result<Self> {
        let segments = split_path(path);
        if segments.len() < 3 {
            return Err(DirectoryError::Request(format!(
                "gateway path needs a network and two last names: {path}"
            )));
        }

        let network = NetworkToken::parse(segments[0]);
        Ok(Self::from_name_segments(network, &segments[1..]))
    }

    // == From Backend Path ==
    /// Parses `/<given...>/<lastName1>/<lastName2>` for a backend serving
    /// `network`.
    ///
    /// A leading segment equal to the backend's own network token is
    /// skipped, so paths forwarded by the gateway are accepted too.
    pub fn from_backend_path(path: &str, network: &str) -> Result<Self> {
        let mut segments = split_path(path);
        if segments.len() >= 3 && segments[0].eq_ignore_ascii_case(network) {
            segments.remove(0);
        }
        if segments.len() < 2 {
            return Err(DirectoryError::Request(format!(
                "backend path needs two last names: {path}"
            )));
        }

        Ok(Self::from_name_segments(
            NetworkToken::parse(network),
            &segments,
        ))
    }

    /// `segments` must hold at least the two last names.
    fn from_name_segments(network: NetworkToken, segments: &[&str]) -> Self {
        let n = segments.len();
        Self {
            network,
            given_names: segments[..n - 2].iter().map(|s| s.to_string()).collect(),
            last_names: (segments[n - 2].to_string(), segments[n - 1].to_string()),
        }
    }

    // == Identity Key ==
    /// Cache identity: space-joined given names immediately followed by the
    /// space-joined last names.
    ///
    /// There is no separator between the two halves, so different name
    /// splits can produce the same key.
    pub fn identity_key(&self) -> String {
        format!(
            "{}{} {}",
            self.given_names.join(" "),
            self.last_names.0,
            self.last_names.1
        )
    }

    /// Returns `<given...>/<lastName1>/<lastName2>`.
    pub fn names_path(&self) -> String {
        let mut segments: Vec<&str> = self.given_names.iter().map(String::as_str).collect();
        segments.push(&self.last_names.0);
        segments.push(&self.last_names.1);
        segments.join("/")
    }

    /// Returns the gateway-style path `/<network>/<given...>/<l1>/<l2>`.
    pub fn to_path(&self) -> String {
        format!("/{}/{}", self.network, self.names_path())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {}",
            self.network,
            self.given_names.join(" "),
            self.last_names.0,
            self.last_names.1
        )
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}
