//! Error taxonomy for API calls.

use thiserror::Error;

/// Notice shown once when the server rejects the session.
pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Everything that can go wrong between issuing a request and having a typed
/// response in hand.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered 401. The client's unauthorized hook has already
    /// run, so callers must not surface another notice. `message` is the
    /// server's own reason when the body carried one.
    #[error("{}", SESSION_EXPIRED)]
    Unauthorized { message: Option<String> },

    /// Non-2xx response. `message` is the server's `message` field verbatim
    /// when it sent one.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// 2xx response whose `status` field was not `"success"`.
    #[error("{message}")]
    Rejected { message: String },

    /// The body was empty or not JSON.
    #[error("Server error: {status_text}")]
    Parse { status: u16, status_text: String },

    /// Valid JSON that does not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// No response at all (DNS, connection refused, CORS, offline).
    #[error("Unable to reach the server: {0}")]
    Transport(String),

    /// The request itself could not be built.
    #[error("Failed to build request: {0}")]
    Encode(String),
}

impl ApiError {
    pub(crate) fn parse(status: u16, status_text: &str) -> Self {
        let status_text = if status_text.is_empty() {
            "Invalid response".to_string()
        } else {
            status_text.to_string()
        };
        Self::Parse {
            status,
            status_text,
        }
    }

    /// Message used when a failed response carries no `message` field.
    pub(crate) fn request_failed(status: u16) -> Self {
        Self::Application {
            status,
            message: format!("Request failed with status {status}"),
        }
    }

    /// Whether the server never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
