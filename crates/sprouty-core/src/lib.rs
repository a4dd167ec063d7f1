//! # Sprouty Core
//!
//! Client side of the sprouty gardening assistant: typed façades over the
//! reminder, plant and diagnosis services, plus garden log helpers.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`SproutyClient`] composition root |
//! | [`clients`] | Reminder, plant and diagnosis façades |
//! | [`config`] | Base URL, origin and timeouts |
//! | [`domain`] | Wire models and garden log helpers |
//! | [`error`] | Validation and transport errors |
//! | [`events`] | Client-owned event bus |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`result`] | Uniform operation result |
//! | [`token`] | Token storage and local expiry check |
//! | [`transport`] | Shared transport with request/response interceptors |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sprouty_core::{ClientConfig, FetchMode, MemoryTokenStore, SproutyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = Arc::new(MemoryTokenStore::with_token("eyJ..."));
//!     let client = SproutyClient::with_reqwest(ClientConfig::from_env()?, tokens);
//!
//!     let due = client.reminders().list_due_reminders(FetchMode::Network).await;
//!     if !due.success {
//!         eprintln!("{}", due.error.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Service operations never return `Err`. Every call resolves to an
//! [`ApiResult`] whose flags say what went wrong:
//!
//! ```rust
//! use sprouty_core::ApiResult;
//!
//! fn describe(result: &ApiResult) -> &'static str {
//!     if result.success {
//!         "ok"
//!     } else if result.is_auth_error {
//!         "sign in again"
//!     } else if result.is_cors_error {
//!         "backend unreachable"
//!     } else {
//!         "request failed"
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! The local token check only reads the expiry claim; it verifies no
//! signature and is not an authorization boundary. Tokens are never logged.

pub mod client;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod http_client;
pub mod result;
pub mod token;
pub mod transport;

pub use client::SproutyClient;

pub use clients::{
    DiagnosisClient, FetchMode, PlantClient, ReminderClient, DUE_UNREACHABLE_MESSAGE,
    SESSION_EXPIRED_MESSAGE,
};

pub use config::ClientConfig;

pub use domain::{
    fallback_reminders, filter_plants, last_care_action, CareAction, DiagnosisRequest,
    DiagnosisSummary, FrequencyInput, HealthGrade, ImageUpload, NewReminder, Plant, PlantStatus,
    PlantUpdate, Reminder, ReminderInput, ReminderPlant, ReminderUpdate, UtcDateTime,
    FALLBACK_SCHEMA_VERSION,
};

pub use error::{TransportError, ValidationError};

pub use events::{ClientEvent, EventBus};

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

pub use result::{ApiResult, ConnectivityReport, INVALID_TOKEN_MESSAGE};

pub use token::{inspect_token, MemoryTokenStore, TokenStore, TokenVerdict};

pub use transport::Transport;
