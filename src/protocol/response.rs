//! Response encoding

// == Response ==
/// Every response a gateway or backend can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// 200 with a non-empty body
    Found(String),
    /// 404 with an empty body
    NotFound,
    /// 405 with an empty body
    MethodNotAllowed,
    /// Bare 200 for the liveness path
    Ack,
    /// 302 pointing at `<host>:<port>/<names...>`
    Redirect(String),
}

impl Response {
    /// Maps a service answer to a response; an empty body means not found.
    pub fn from_body(body: String) -> Self {
        if body.is_empty() {
            Self::NotFound
        } else {
            Self::Found(body)
        }
    }

    pub fn status_line(&self) -> &'static str {
        match self {
            Self::Found(_) | Self::Ack => "HTTP/1.1 200 OK",
            Self::NotFound => "HTTP/1.1 404 Not Found",
            Self::MethodNotAllowed => "HTTP/1.1 405 Method Not Allowed",
            Self::Redirect(_) => "HTTP/1.1 302 Found",
        }
    }

    /// Encodes the response for the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let encoded = match self {
            Self::Found(body) => format!("{}\r\n\r\n{}", self.status_line(), body),
            Self::Redirect(location) => {
                format!("{}\r\nLocation: {}\r\n\r\n", self.status_line(), location)
            }
            Self::NotFound | Self::MethodNotAllowed | Self::Ack => {
                format!("{}\r\n\r\n", self.status_line())
            }
        };
        encoded.into_bytes()
    }
}
