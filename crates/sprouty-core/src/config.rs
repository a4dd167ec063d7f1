//! Client configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SPROUTY_API_URL` | `https://backend-sprouty.onrender.com/api` | Backend base URL |
//! | `SPROUTY_ORIGIN` | `http://localhost:5173` | Origin reported in `X-Requested-From` |
//! | `SPROUTY_TIMEOUT_MS` | `15000` | Default request timeout |

use crate::error::ValidationError;
use crate::http_client::DEFAULT_TIMEOUT_MS;

pub const DEFAULT_API_URL: &str = "https://backend-sprouty.onrender.com/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_DIAGNOSIS_TIMEOUT_MS: u64 = 60_000;

/// Origins the backend is known to accept cross-origin calls from.
pub const ALLOWED_ORIGINS: [&str; 2] = ["https://sproutywebpp.vercel.app", "http://localhost:5173"];

const API_URL_VAR: &str = "SPROUTY_API_URL";
const ORIGIN_VAR: &str = "SPROUTY_ORIGIN";
const TIMEOUT_VAR: &str = "SPROUTY_TIMEOUT_MS";

/// Settings of the shared transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    pub origin: String,
    pub timeout_ms: u64,
    pub probe_timeout_ms: u64,
    pub diagnosis_timeout_ms: u64,
    pub allowed_origins: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_URL),
            origin: String::from(DEFAULT_ORIGIN),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            diagnosis_timeout_ms: DEFAULT_DIAGNOSIS_TIMEOUT_MS,
            allowed_origins: ALLOWED_ORIGINS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into())?,
            ..Self::default()
        })
    }

    /// Reads configuration from the process environment, falling back to the
    /// fixed defaults for unset variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR).unwrap_or_else(|| String::from(DEFAULT_API_URL));
        let mut config = Self::new(base_url)?;

        if let Some(origin) = lookup(ORIGIN_VAR).filter(|value| !value.trim().is_empty()) {
            config.origin = origin.trim().to_owned();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout_ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ValidationError::InvalidEnvValue {
                    name: TIMEOUT_VAR,
                    value: raw,
                })?;
        }

        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        self.base_url = normalize_base_url(base_url.into())?;
        Ok(self)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Joins a path (with leading slash) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn origin_is_allowed(&self) -> bool {
        self.allowed_origins.iter().any(|allowed| *allowed == self.origin)
    }
}

fn normalize_base_url(raw: String) -> Result<String, ValidationError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: "base url" });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ValidationError::InvalidBaseUrl {
            value: trimmed.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}
