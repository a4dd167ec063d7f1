//! Behavior-driven tests for the connectivity probe and the client event bus.

use sprouty_core::{ClientEvent, FetchMode, HttpError, HttpMethod, HttpResponse};
use sprouty_tests::{client_with, url, Arc, RecordingHttpClient, API_URL, OPAQUE_TOKEN};
use tokio::sync::broadcast::error::TryRecvError;

// =============================================================================
// Connectivity probe
// =============================================================================

#[tokio::test]
async fn when_probe_reply_allows_origin_cors_is_reported_enabled() {
    let http = Arc::new(RecordingHttpClient::responding(
        HttpResponse::new(204, "").with_header("Access-Control-Allow-Origin", "*"),
    ));
    let client = client_with(&http, None);

    let report = client.reminders().check_api_connectivity().await;

    assert!(report.success);
    assert!(report.cors_enabled);
    assert_eq!(report.error, None);

    let request = http.last_request();
    assert_eq!(request.method, HttpMethod::Options);
    assert_eq!(request.url, url("/reminders/due"));
    assert_eq!(request.timeout_ms, 5_000);
    assert_eq!(request.header("authorization"), None, "probe bypasses interceptors");
    assert_eq!(request.header("x-requested-from"), None);
}

#[tokio::test]
async fn when_probe_reply_lacks_origin_header_cors_is_reported_disabled() {
    let http = Arc::new(RecordingHttpClient::responding(HttpResponse::new(200, "")));
    let client = client_with(&http, None);

    let report = client.reminders().check_api_connectivity().await;

    assert!(report.success);
    assert!(!report.cors_enabled);
}

#[tokio::test]
async fn when_probe_cannot_connect_the_error_is_reported_without_events() {
    let http = Arc::new(RecordingHttpClient::failing(HttpError::connect("Network Error")));
    let client = client_with(&http, None);
    let mut events = client.events().subscribe();

    let report = client.reminders().check_api_connectivity().await;

    assert!(!report.success);
    assert!(!report.cors_enabled);
    assert_eq!(report.error.as_deref(), Some("Network Error"));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn when_probe_gets_an_error_status_it_counts_as_failure() {
    let http = Arc::new(RecordingHttpClient::responding(HttpResponse::new(404, "")));
    let client = client_with(&http, None);

    let report = client.reminders().check_api_connectivity().await;

    assert!(!report.success);
    assert_eq!(
        report.error.as_deref(),
        Some("request failed with status code 404")
    );
}

// =============================================================================
// Event bus
// =============================================================================

#[tokio::test]
async fn when_backend_is_unreachable_one_network_event_is_published() {
    // Given: A subscriber on the client's event bus
    let http = Arc::new(RecordingHttpClient::failing(HttpError::connect("Network Error")));
    let client = client_with(&http, Some(OPAQUE_TOKEN));
    let mut events = client.events().subscribe();

    // When: A call fails without a response
    let _ = client.reminders().reminder_stats().await;

    // Then: Exactly one network event names the origin and the API
    assert_eq!(
        events.try_recv(),
        Ok(ClientEvent::NetworkUnreachable {
            origin: String::from("http://localhost:5173"),
            api: String::from(API_URL),
        })
    );
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn when_backend_answers_401_auth_expired_is_published() {
    let http = Arc::new(RecordingHttpClient::responding(HttpResponse::new(401, "")));
    let client = client_with(&http, Some(OPAQUE_TOKEN));
    let mut events = client.events().subscribe();

    let result = client.reminders().list_due_reminders(FetchMode::Network).await;

    assert!(result.is_auth_error);
    assert_eq!(events.try_recv(), Ok(ClientEvent::AuthExpired));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn when_backend_answers_other_errors_no_event_is_published() {
    let http = Arc::new(RecordingHttpClient::responding(HttpResponse::new(500, "")));
    let client = client_with(&http, Some(OPAQUE_TOKEN));
    let mut events = client.events().subscribe();

    let _ = client.plants().list_plants().await;
    let timeout = Arc::new(RecordingHttpClient::failing(HttpError::timeout(
        "timeout of 15000ms exceeded",
    )));
    let slow_client = client_with(&timeout, Some(OPAQUE_TOKEN));
    let mut slow_events = slow_client.events().subscribe();
    let result = slow_client.reminders().list_due_reminders(FetchMode::Network).await;

    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(slow_events.try_recv(), Err(TryRecvError::Empty));
    assert!(!result.is_cors_error, "timeouts are not classified as CORS");
    assert!(result.fallback_data.is_some());
}

#[tokio::test]
async fn when_several_listeners_subscribe_each_receives_the_event() {
    let http = Arc::new(RecordingHttpClient::responding(HttpResponse::new(401, "")));
    let client = client_with(&http, Some(OPAQUE_TOKEN));
    let mut first = client.events().subscribe();
    let mut second = client.events().subscribe();

    let _ = client.reminders().complete_reminder("r1").await;

    assert_eq!(first.try_recv(), Ok(ClientEvent::AuthExpired));
    assert_eq!(second.try_recv(), Ok(ClientEvent::AuthExpired));
}

#[tokio::test]
async fn when_fallback_is_forced_no_events_are_published() {
    let http = Arc::new(RecordingHttpClient::failing(HttpError::connect("Network Error")));
    let client = client_with(&http, None);
    let mut events = client.events().subscribe();

    let _ = client.reminders().list_due_reminders(FetchMode::Fallback).await;

    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}
