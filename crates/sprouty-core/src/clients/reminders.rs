use std::sync::Arc;

use crate::domain::{fallback_reminders, ReminderInput, ReminderUpdate, UtcDateTime, DEFAULT_SNOOZE_MINUTES};
use crate::error::TransportError;
use crate::http_client::{HttpMethod, HttpRequest};
use crate::result::{ApiResult, ConnectivityReport};
use crate::transport::{correlation_id, resource_path, Transport};

use super::rejected;

const REMINDERS: &str = "/reminders";
const UPCOMING: &str = "/reminders/upcoming";
const DUE: &str = "/reminders/due";
const STATS: &str = "/reminders/stats";

pub const DUE_UNREACHABLE_MESSAGE: &str =
    "Network Error - Unable to connect to the reminder service. If this persists, please contact support.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Where "list due reminders" takes its data from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    #[default]
    Network,
    /// Skip the network and serve the fallback dataset.
    Fallback,
}

/// Client for the reminder service.
#[derive(Clone)]
pub struct ReminderClient {
    transport: Arc<Transport>,
}

impl ReminderClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET /reminders`
    pub async fn list_reminders(&self) -> ApiResult {
        if !self.transport.token_is_usable() {
            return ApiResult::invalid_token();
        }
        let request = self.transport.request(HttpMethod::Get, REMINDERS);
        self.send(request, "fetching reminders").await
    }

    /// `GET /reminders/upcoming`; the seven-day window is applied server-side.
    pub async fn list_upcoming_reminders(&self) -> ApiResult {
        if !self.transport.token_is_usable() {
            return ApiResult::invalid_token();
        }
        let request = self.transport.request(HttpMethod::Get, UPCOMING);
        self.send(request, "fetching upcoming reminders").await
    }

    /// `GET /reminders/due`.
    ///
    /// Failures always carry the fallback dataset in `fallbackData`; it is
    /// never substituted for `data`.
    pub async fn list_due_reminders(&self, mode: FetchMode) -> ApiResult {
        if mode == FetchMode::Fallback {
            tracing::info!("using fallback reminder data");
            return ApiResult::fallback(fallback_reminders());
        }

        if !self.transport.token_is_usable() {
            return ApiResult::invalid_token();
        }

        let request_id = correlation_id();
        tracing::debug!(%request_id, "fetching due reminders");
        let request = self
            .transport
            .request(HttpMethod::Get, DUE)
            .with_header("x-request-id", request_id.as_str());

        match self.transport.send(request).await {
            Ok(body) => {
                tracing::debug!(%request_id, "fetched due reminders");
                ApiResult::from_backend(body)
            }
            Err(error @ TransportError::Unreachable(_)) => {
                tracing::error!(%request_id, %error, "error fetching due reminders: network error (possible CORS issue)");
                ApiResult::cors_error(DUE_UNREACHABLE_MESSAGE).with_fallback_data(fallback_reminders())
            }
            Err(TransportError::Unauthorized { .. }) => {
                ApiResult::auth_error(SESSION_EXPIRED_MESSAGE).with_fallback_data(fallback_reminders())
            }
            Err(error) => {
                tracing::error!(%request_id, %error, "error fetching due reminders");
                ApiResult::failure(error.user_message()).with_fallback_data(fallback_reminders())
            }
        }
    }

    /// `POST /reminders` with the normalized form of `input`.
    pub async fn create_reminder(&self, input: ReminderInput) -> ApiResult {
        let body = input.normalize();
        match self.transport.json_request(HttpMethod::Post, REMINDERS, &body) {
            Ok(request) => self.send(request, "creating reminder").await,
            Err(error) => ApiResult::from_outcome(Err(error), "creating reminder"),
        }
    }

    /// `PUT /reminders/{id}` with the fields set in `update`.
    pub async fn update_reminder(&self, id: &str, update: &ReminderUpdate) -> ApiResult {
        self.put_update(id, update, "updating reminder").await
    }

    /// `DELETE /reminders/{id}`
    pub async fn delete_reminder(&self, id: &str) -> ApiResult {
        self.send_to(HttpMethod::Delete, id, "", "deleting reminder")
            .await
    }

    /// `PUT /reminders/{id}/complete`
    pub async fn complete_reminder(&self, id: &str) -> ApiResult {
        self.send_to(HttpMethod::Put, id, "/complete", "completing reminder")
            .await
    }

    /// `PUT /reminders/{id}/notification-sent`
    pub async fn mark_notification_sent(&self, id: &str) -> ApiResult {
        self.send_to(
            HttpMethod::Put,
            id,
            "/notification-sent",
            "marking notification sent",
        )
        .await
    }

    /// Reschedules to now + `minutes` (30 when `None`) and re-arms the
    /// notification.
    pub async fn snooze_reminder(&self, id: &str, minutes: Option<i64>) -> ApiResult {
        let minutes = minutes.unwrap_or(DEFAULT_SNOOZE_MINUTES);
        match ReminderUpdate::snooze(UtcDateTime::now(), minutes) {
            Some(update) => self.put_update(id, &update, "snoozing reminder").await,
            None => {
                tracing::warn!(minutes, "snooze target is outside the supported date range");
                ApiResult::failure(format!("cannot snooze by {minutes} minutes: date out of range"))
            }
        }
    }

    /// `GET /reminders/stats`
    pub async fn reminder_stats(&self) -> ApiResult {
        let request = self.transport.request(HttpMethod::Get, STATS);
        self.send(request, "fetching reminder stats").await
    }

    /// Probes `OPTIONS /reminders/due` outside the interceptors and reports
    /// whether the reply allowed cross-origin access. Publishes no events.
    pub async fn check_api_connectivity(&self) -> ConnectivityReport {
        let config = self.transport.config();
        let request = HttpRequest::new(HttpMethod::Options, config.url(DUE))
            .with_timeout_ms(config.probe_timeout_ms);

        match self.transport.http().execute(request).await {
            Ok(response) if response.is_success() => ConnectivityReport::reachable(
                response
                    .header("access-control-allow-origin")
                    .is_some_and(|value| !value.is_empty()),
            ),
            Ok(response) => ConnectivityReport::unreachable(format!(
                "request failed with status code {}",
                response.status
            )),
            Err(error) => ConnectivityReport::unreachable(error.message()),
        }
    }

    async fn send(&self, request: HttpRequest, operation: &str) -> ApiResult {
        ApiResult::from_outcome(self.transport.send(request).await, operation)
    }

    async fn send_to(&self, method: HttpMethod, id: &str, suffix: &str, operation: &str) -> ApiResult {
        match resource_path(REMINDERS, id, suffix) {
            Ok(path) => {
                let request = self.transport.request(method, &path);
                self.send(request, operation).await
            }
            Err(error) => rejected(&error, operation),
        }
    }

    async fn put_update(&self, id: &str, update: &ReminderUpdate, operation: &str) -> ApiResult {
        let path = match resource_path(REMINDERS, id, "") {
            Ok(path) => path,
            Err(error) => return rejected(&error, operation),
        };
        match self.transport.json_request(HttpMethod::Put, &path, update) {
            Ok(request) => self.send(request, operation).await,
            Err(error) => ApiResult::from_outcome(Err(error), operation),
        }
    }
}
