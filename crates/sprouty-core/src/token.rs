//! Local bearer-token storage and the advisory usability check run before
//! read operations.
//!
//! The check decodes a three-segment token's payload and compares its `exp`
//! claim with the wall clock. The signature is never verified: a token that
//! passes here may still be rejected by the backend, which stays the
//! authority on authentication.

use std::sync::RwLock;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use time::OffsetDateTime;

const SEGMENT_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_SEGMENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, SEGMENT_CONFIG);
const STANDARD_SEGMENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, SEGMENT_CONFIG);

/// Read access to the externally owned credential token.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// In-memory token slot that a sign-in flow fills and a sign-out clears.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.clone())
            .filter(|token| !token.is_empty())
    }
}

/// Outcome of the local token check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVerdict {
    Usable,
    Missing,
    Expired,
    /// Three segments, but the payload could not be decoded.
    Malformed,
}

impl TokenVerdict {
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Usable)
    }
}

/// Inspects `token` against the clock `now`. Pure; no logging.
pub fn inspect_token(token: Option<&str>, now: OffsetDateTime) -> TokenVerdict {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return TokenVerdict::Missing;
    };

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return TokenVerdict::Usable;
    }

    let Some(payload) = decode_segment(segments[1]) else {
        return TokenVerdict::Malformed;
    };

    let Ok(claims) = serde_json::from_slice::<serde_json::Value>(&payload) else {
        return TokenVerdict::Malformed;
    };

    match claims.get("exp").and_then(serde_json::Value::as_f64) {
        Some(exp) if exp * 1000.0 < unix_millis(now) => TokenVerdict::Expired,
        _ => TokenVerdict::Usable,
    }
}

/// Reads the token from `store` and decides whether a request should be
/// attempted, logging every negative verdict.
pub fn validate_token(store: &dyn TokenStore) -> bool {
    let token = store.token();
    let verdict = inspect_token(token.as_deref(), OffsetDateTime::now_utc());
    match verdict {
        TokenVerdict::Usable => {}
        TokenVerdict::Missing => tracing::warn!("no auth token found"),
        TokenVerdict::Expired => tracing::warn!("auth token expired"),
        TokenVerdict::Malformed => tracing::error!("auth token payload could not be decoded"),
    }
    verdict.is_usable()
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_SEGMENT
        .decode(segment)
        .or_else(|_| STANDARD_SEGMENT.decode(segment))
        .ok()
}

fn unix_millis(now: OffsetDateTime) -> f64 {
    (now.unix_timestamp_nanos() / 1_000_000) as f64
}
