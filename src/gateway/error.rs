use thiserror::Error;

/// Fallback display text when the backend provides no error message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Classified failure of a gateway call. Expected failure classes are values,
/// not panics: every gateway call resolves with either a typed body or one of
/// these.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Session missing or expired and the refresh attempt failed or was
    /// itself rejected.
    #[error("session missing or expired")]
    Unauthorized,

    /// A 4xx other than 401. Message and code are surfaced verbatim from the
    /// backend when present.
    #[error("{message}")]
    Client {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A 5xx, or a 2xx whose body violates the response envelope contract.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Transport failure: no response was received at all.
    #[error("network failure: {0}")]
    Network(String),
}

impl GatewayError {
    /// True for failures that should surface the session-expired flow.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }
}

/// Outcome of a token refresh round trip. Cloneable so that one in-flight
/// refresh can be shared by every coalesced caller.
#[derive(Debug, Clone)]
pub(crate) enum RefreshError {
    Rejected(u16),
    Transport(String),
}

impl std::fmt::Display for RefreshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshError::Rejected(status) => write!(f, "refresh rejected with status {}", status),
            RefreshError::Transport(message) => write!(f, "refresh transport failure: {}", message),
        }
    }
}
