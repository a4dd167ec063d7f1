//! The uniform outcome every public client operation resolves to.
//!
//! An [`ApiResult`] always carries `success`. `data` is only present when
//! `success` is true, and is omitted when the backend answered with an empty
//! body; `error` is present exactly when `success` is false. The
//! classifying flags are omitted from the serialized form unless set, so a
//! serialized result reads like the backend's own envelope:
//!
//! ```json
//! { "success": false, "error": "...", "isCorsError": true, "fallbackData": [...] }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Reminder;
use crate::error::TransportError;

pub const INVALID_TOKEN_MESSAGE: &str =
    "Invalid or expired authentication token. Please sign in again.";

const ENVELOPE_KEYS: [&str; 6] = [
    "success",
    "data",
    "isAuthError",
    "isCorsError",
    "isFallback",
    "fallbackData",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_auth_error: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_cors_error: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_data: Option<Vec<Reminder>>,
    /// Any other top-level field the backend sent (`count`, `message`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            is_auth_error: false,
            is_cors_error: false,
            is_fallback: false,
            fallback_data: None,
            extra: Map::new(),
        }
    }

    /// Success without a payload, e.g. a `204` reply.
    pub fn empty() -> Self {
        Self {
            data: None,
            ..Self::ok(Value::Null)
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            is_auth_error: false,
            is_cors_error: false,
            is_fallback: false,
            fallback_data: None,
            extra: Map::new(),
        }
    }

    /// Local short-circuit: the stored token is missing or expired.
    pub fn invalid_token() -> Self {
        Self::auth_error(INVALID_TOKEN_MESSAGE)
    }

    pub fn auth_error(error: impl Into<String>) -> Self {
        Self {
            is_auth_error: true,
            ..Self::failure(error)
        }
    }

    pub fn cors_error(error: impl Into<String>) -> Self {
        Self {
            is_cors_error: true,
            ..Self::failure(error)
        }
    }

    /// Placeholder data served on purpose instead of a network call.
    pub fn fallback(reminders: Vec<Reminder>) -> Self {
        let data = serde_json::to_value(&reminders).unwrap_or(Value::Array(Vec::new()));
        Self {
            is_fallback: true,
            ..Self::ok(data)
        }
    }

    pub fn with_fallback_data(mut self, reminders: Vec<Reminder>) -> Self {
        self.fallback_data = Some(reminders);
        self
    }

    /// Maps a decoded backend body onto the uniform shape.
    ///
    /// An object carrying a boolean `success` is the backend's own envelope and
    /// is kept field for field; anything else is treated as a bare payload.
    pub fn from_backend(body: Value) -> Self {
        let mut object = match body {
            Value::Object(object) if object.get("success").is_some_and(Value::is_boolean) => object,
            Value::Null => return Self::empty(),
            other => return Self::ok(other),
        };

        let success = object
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let data = object.remove("data");

        let mut result = if success {
            data.map_or_else(Self::empty, Self::ok)
        } else {
            let error = match object.remove("error") {
                Some(Value::String(message)) => message,
                Some(other) if !other.is_null() => other.to_string(),
                _ => object
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("request failed")
                    .to_owned(),
            };
            Self::failure(error)
        };

        for key in ENVELOPE_KEYS {
            object.remove(key);
        }
        result.extra = object;
        result
    }

    /// Resolves one transport outcome, logging the failure branch.
    pub fn from_outcome(outcome: Result<Value, TransportError>, operation: &str) -> Self {
        match outcome {
            Ok(body) => Self::from_backend(body),
            Err(error) => {
                tracing::error!(%error, "error {operation}");
                Self::failure(error.user_message())
            }
        }
    }

    /// Deserializes `data` into a typed payload, if present.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data
            .as_ref()
            .map(|data| serde_json::from_value(data.clone()))
    }
}

/// Outcome of the connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityReport {
    pub success: bool,
    pub cors_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectivityReport {
    pub const fn reachable(cors_enabled: bool) -> Self {
        Self {
            success: true,
            cors_enabled,
            error: None,
        }
    }

    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            success: false,
            cors_enabled: false,
            error: Some(error.into()),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}
