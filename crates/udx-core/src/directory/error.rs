//! Error taxonomy for directory operations.

use std::fmt;

/// Normalized failure for every directory operation.
///
/// All kinds carry a human-readable message; none are retried. Auth and
/// request errors leave the stored session untouched — a 401 does not log
/// the operator out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Rejected locally before any network call (malformed phone number,
    /// empty required field).
    Validation(String),
    /// Login rejected, or a protected call answered 401/403.
    Auth(String),
    /// Any other non-2xx status, or a network failure with no response.
    Request {
        /// HTTP status when a response arrived; `None` for network failures.
        status: Option<u16>,
        message: String,
    },
    /// Response body did not match the endpoint's schema.
    Schema(String),
}

impl DirectoryError {
    /// The human-readable message for display.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Auth(m) | Self::Schema(m) => m,
            Self::Request { message, .. } => message,
        }
    }
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for DirectoryError {}
