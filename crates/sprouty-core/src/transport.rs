//! Shared transport used by every service client.
//!
//! Every outbound call passes two interceptors:
//!
//! - **request**: attaches `Authorization: Bearer <token>` when a token is
//!   stored and always attaches `X-Requested-From: <origin>`;
//! - **response**: passes successes through; classifies failures, logs them
//!   and publishes at most one [`ClientEvent`] per failing call before handing
//!   the classified error back to the caller.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{TransportError, ValidationError};
use crate::events::{ClientEvent, EventBus};
use crate::http_client::{HttpClient, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse};
use crate::token::{validate_token, TokenStore};

const CORRELATION_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const CORRELATION_ID_LEN: usize = 13;

pub struct Transport {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    events: EventBus,
}

impl Transport {
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            http,
            config,
            tokens,
            events: EventBus::default(),
        }
    }

    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Raw transport, bypassing both interceptors.
    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Advisory local check of the stored token.
    pub fn token_is_usable(&self) -> bool {
        validate_token(self.tokens.as_ref())
    }

    /// Builds a request against `path` with the shared defaults.
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, self.config.url(path))
            .with_header("content-type", "application/json")
            .with_timeout_ms(self.config.timeout_ms)
    }

    /// Builds a request carrying `body` as JSON.
    pub fn json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, TransportError> {
        let body =
            serde_json::to_string(body).map_err(|error| TransportError::Encode(error.to_string()))?;
        Ok(self.request(method, path).with_body(body))
    }

    /// Sends `request` through both interceptors and decodes the body.
    ///
    /// An empty body decodes to `null`; a body that is not JSON is returned
    /// as a JSON string.
    pub async fn send(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let request = self.intercept_request(request);
        let method = request.method;
        let url = request.url.clone();

        let outcome = match self.http.execute(request).await {
            Ok(response) if response.is_success() => Ok(decode_body(&response.body)),
            Ok(response) => Err(classify_status(&response)),
            Err(error) => Err(match error.kind() {
                HttpErrorKind::Connect => TransportError::Unreachable(error),
                HttpErrorKind::Timeout => TransportError::Timeout(error),
                HttpErrorKind::Body | HttpErrorKind::Other => TransportError::Other(error),
            }),
        };

        outcome.map_err(|error| self.intercept_failure(method, &url, error))
    }

    fn intercept_request(&self, request: HttpRequest) -> HttpRequest {
        let request = match self.tokens.token() {
            Some(token) => request.with_bearer_token(&token),
            None => request,
        };
        request.with_header("x-requested-from", self.config.origin.as_str())
    }

    fn intercept_failure(&self, method: HttpMethod, url: &str, error: TransportError) -> TransportError {
        match &error {
            TransportError::Unreachable(_) => {
                tracing::error!(
                    %method,
                    url,
                    origin = %self.config.origin,
                    api = %self.config.base_url(),
                    "unable to connect to the API server; this may be a CORS policy restriction"
                );
                if !self.config.origin_is_allowed() {
                    tracing::error!(
                        origin = %self.config.origin,
                        "current origin is not in the allowed list; this might be causing CORS issues"
                    );
                }
                self.events.publish(ClientEvent::NetworkUnreachable {
                    origin: self.config.origin.clone(),
                    api: self.config.base_url().to_owned(),
                });
            }
            TransportError::Unauthorized { .. } => {
                tracing::error!(%method, url, "authentication error: the session may have expired");
                self.events.publish(ClientEvent::AuthExpired);
            }
            other => {
                tracing::error!(%method, url, error = %other.user_message(), "API error");
            }
        }
        error
    }
}

fn decode_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

fn classify_status(response: &HttpResponse) -> TransportError {
    let body = serde_json::from_str::<Value>(&response.body).ok();
    if response.status == 401 {
        TransportError::Unauthorized { body }
    } else {
        TransportError::Status {
            status: response.status,
            body,
        }
    }
}

/// Joins a collection path and a percent-encoded identifier.
pub fn resource_path(collection: &str, id: &str, suffix: &str) -> Result<String, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyField { field: "id" });
    }
    Ok(format!("{collection}/{}{suffix}", urlencoding::encode(id)))
}

/// Random lowercase base-36 identifier attached as `X-Request-ID`.
pub fn correlation_id() -> String {
    (0..CORRELATION_ID_LEN)
        .map(|_| char::from(CORRELATION_ALPHABET[fastrand::usize(..CORRELATION_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::token::MemoryTokenStore;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct ScriptedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn new(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> HttpRequest {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .last()
                .cloned()
                .expect("one request recorded")
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn transport(http: Arc<ScriptedHttpClient>, token: Option<&str>) -> Transport {
        let tokens = match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        };
        let config = ClientConfig::new("http://api.test/api").expect("valid config");
        Transport::new(config, http, Arc::new(tokens))
    }

    #[tokio::test]
    async fn request_interceptor_adds_auth_and_origin() {
        let http = ScriptedHttpClient::new(Ok(HttpResponse::ok_json(r#"{"success":true}"#)));
        let transport = transport(http.clone(), Some("tok"));

        let body = transport
            .send(transport.request(HttpMethod::Get, "/reminders"))
            .await
            .expect("success");

        assert_eq!(body, serde_json::json!({ "success": true }));
        let request = http.last_request();
        assert_eq!(request.url, "http://api.test/api/reminders");
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
        assert_eq!(request.header("x-requested-from"), Some("http://localhost:5173"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.timeout_ms, 15_000);
    }

    #[tokio::test]
    async fn missing_token_sends_no_authorization_header() {
        let http = ScriptedHttpClient::new(Ok(HttpResponse::new(204, "")));
        let transport = transport(http.clone(), None);

        let body = transport
            .send(transport.request(HttpMethod::Delete, "/reminders/r1"))
            .await
            .expect("success");

        assert_eq!(body, Value::Null);
        assert_eq!(http.last_request().header("authorization"), None);
    }

    #[tokio::test]
    async fn connect_failure_is_unreachable_and_broadcast() {
        let http = ScriptedHttpClient::new(Err(HttpError::connect("network error")));
        let transport = transport(http, Some("tok"));
        let mut events = transport.events().subscribe();

        let error = transport
            .send(transport.request(HttpMethod::Get, "/reminders"))
            .await
            .expect_err("must fail");

        assert!(error.is_unreachable());
        assert_eq!(
            events.try_recv().expect("one event"),
            ClientEvent::NetworkUnreachable {
                origin: String::from("http://localhost:5173"),
                api: String::from("http://api.test/api"),
            }
        );
        assert!(events.try_recv().is_err(), "at most one event per call");
    }

    #[tokio::test]
    async fn status_401_is_unauthorized_and_broadcast() {
        let http = ScriptedHttpClient::new(Ok(HttpResponse::new(401, r#"{"error":"jwt expired"}"#)));
        let transport = transport(http, Some("tok"));
        let mut events = transport.events().subscribe();

        let error = transport
            .send(transport.request(HttpMethod::Get, "/reminders"))
            .await
            .expect_err("must fail");

        assert!(error.is_unauthorized());
        assert_eq!(error.user_message(), "jwt expired");
        assert_eq!(events.try_recv().expect("one event"), ClientEvent::AuthExpired);
    }

    #[tokio::test]
    async fn other_failures_publish_nothing() {
        let http = ScriptedHttpClient::new(Ok(HttpResponse::new(500, "oops")));
        let transport = transport(http, Some("tok"));
        let mut events = transport.events().subscribe();

        let error = transport
            .send(transport.request(HttpMethod::Get, "/reminders"))
            .await
            .expect_err("must fail");

        assert_eq!(error.status(), Some(500));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn resource_path_encodes_identifier() {
        assert_eq!(
            resource_path("/reminders", "a b/c", "/complete").expect("valid id"),
            "/reminders/a%20b%2Fc/complete"
        );
        assert!(resource_path("/reminders", "  ", "").is_err());
    }

    #[test]
    fn correlation_ids_are_base36() {
        let id = correlation_id();
        assert_eq!(id.len(), 13);
        assert!(id.chars().all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
        assert_ne!(id, correlation_id());
    }
}
