use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of backend errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientErrorKind {
    /// Could not reach the backend at all
    Connection,
    /// Connection timeout or request timeout
    Timeout,
    /// Credentials rejected (401/403)
    Unauthorized,
    /// Any other non-success HTTP status
    HttpStatus,
    /// Failed to parse the response body
    Parse,
    /// Request was never sent because its input was unusable
    InvalidInput,
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientErrorKind::Connection => write!(f, "connection"),
            ClientErrorKind::Timeout => write!(f, "timeout"),
            ClientErrorKind::Unauthorized => write!(f, "unauthorized"),
            ClientErrorKind::HttpStatus => write!(f, "http_status"),
            ClientErrorKind::Parse => write!(f, "parse"),
            ClientErrorKind::InvalidInput => write!(f, "invalid_input"),
        }
    }
}

/// Structured error from the backend client with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientError {
    /// Error category
    pub kind: ClientErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::InvalidInput, message)
    }

    /// Creates an HTTP status error, pulling FastAPI's `detail` field out of
    /// JSON bodies when present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = if matches!(status, 401 | 403) {
            ClientErrorKind::Unauthorized
        } else {
            ClientErrorKind::HttpStatus
        };
        if body.is_empty() {
            return Self::new(kind, format!("HTTP {status}"));
        }

        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("detail").and_then(Value::as_str).map(str::to_string));
        let message = match detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind,
            message,
            details: Some(body.to_string()),
        }
    }

    /// Classifies a reqwest error.
    pub(crate) fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new(ClientErrorKind::Timeout, format!("Request timed out: {e}"))
        } else if e.is_connect() {
            Self::new(ClientErrorKind::Connection, format!("Connection failed: {e}"))
        } else if e.is_decode() {
            Self::new(ClientErrorKind::Parse, format!("Invalid response body: {e}"))
        } else {
            Self::new(ClientErrorKind::Connection, format!("Request error: {e}"))
        }
    }

    /// Human-readable text shown in place of an answer when a request fails.
    pub fn fallback_text(&self) -> &'static str {
        match self.kind {
            ClientErrorKind::Connection | ClientErrorKind::Timeout => "error connecting",
            ClientErrorKind::Unauthorized => "Invalid username or password",
            ClientErrorKind::HttpStatus
            | ClientErrorKind::Parse
            | ClientErrorKind::InvalidInput => "Failed to retrieve answer",
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClientError {}
