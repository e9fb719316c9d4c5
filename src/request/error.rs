//! Fetch error types

use std::fmt;

/// Errors produced by a page fetcher
///
/// The list controller never generates these itself - it only carries them
/// from the fetcher into `FetchStatus::Error` for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Route template references a path parameter that was not supplied
    InvalidRoute { path: String, missing: String },
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Transport failure (connect, timeout, reset)
    Network(String),
    /// Body was not a `{results, count}` document
    Decode(String),
    /// Caller's abort signal fired before the response arrived
    Aborted,
    /// The fetcher itself failed (e.g. panicked) without producing a response
    Internal(String),
}

impl FetchError {
    /// Whether this failure came from the server rather than the transport
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoute { path, missing } => {
                write!(f, "Route {} is missing path parameter '{}'", path, missing)
            }
            Self::Status { status, message } => {
                if message.is_empty() {
                    write!(f, "Server returned {}", status)
                } else {
                    write!(f, "Server returned {}: {}", status, message)
                }
            }
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Decode(msg) => write!(f, "Malformed page response: {}", msg),
            Self::Aborted => write!(f, "Request aborted"),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
