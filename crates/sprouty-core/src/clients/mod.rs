//! Service façades over the shared [`Transport`](crate::transport::Transport).
//!
//! | Client | Backend collection |
//! |--------|--------------------|
//! | [`ReminderClient`] | `/reminders` |
//! | [`PlantClient`] | `/plants` |
//! | [`DiagnosisClient`] | `/diagnosis` |
//!
//! Read operations check the stored token locally first and answer
//! `isAuthError` without touching the network when it is missing or expired.
//! Write operations skip that check and let the backend decide.

mod diagnosis;
mod plants;
mod reminders;

pub use diagnosis::DiagnosisClient;
pub use plants::PlantClient;
pub use reminders::{FetchMode, ReminderClient, DUE_UNREACHABLE_MESSAGE, SESSION_EXPIRED_MESSAGE};

use crate::error::ValidationError;
use crate::result::ApiResult;

/// Local input was rejected before a request could be built.
fn rejected(error: &ValidationError, operation: &str) -> ApiResult {
    tracing::warn!(%error, "error {operation}");
    ApiResult::failure(error.to_string())
}
