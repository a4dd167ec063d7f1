use thiserror::Error;

use crate::http_client::HttpError;

/// Local input errors that are rejected before any request is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("invalid value '{value}' for {name}")]
    InvalidEnvValue { name: &'static str, value: String },

    #[error("please select a valid image file (got content type '{content_type}')")]
    NotAnImage { content_type: String },
    #[error("image must be less than {max_bytes} bytes (got {size})")]
    ImageTooLarge { size: usize, max_bytes: usize },
    #[error("invalid image format, expected a base64 data url")]
    InvalidImageData,
}

/// Failure of one call through the shared transport, after the response
/// interceptor has classified it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    /// No HTTP response was obtained (offline, DNS, blocked CORS preflight).
    #[error("{0}")]
    Unreachable(HttpError),

    #[error("request timed out: {0}")]
    Timeout(HttpError),

    #[error("transport failure: {0}")]
    Other(HttpError),

    #[error("request failed with status code 401")]
    Unauthorized { body: Option<serde_json::Value> },

    #[error("request failed with status code {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },

    #[error("request body could not be encoded: {0}")]
    Encode(String),
}

impl TransportError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Best available human-readable message: the backend's `error` field
    /// when the body carries one, else the transport message.
    pub fn user_message(&self) -> String {
        let body = match self {
            Self::Unauthorized { body } | Self::Status { body, .. } => body.as_ref(),
            _ => None,
        };

        body.and_then(|body| body.get("error"))
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| self.to_string(), str::to_owned)
    }
}
