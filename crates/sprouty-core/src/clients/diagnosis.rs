use std::sync::Arc;

use crate::domain::DiagnosisRequest;
use crate::http_client::HttpMethod;
use crate::result::ApiResult;
use crate::transport::{resource_path, Transport};

use super::rejected;

const DIAGNOSIS: &str = "/diagnosis";
const HISTORY: &str = "/diagnosis/history";

/// Client for image-based disease diagnosis.
#[derive(Clone)]
pub struct DiagnosisClient {
    transport: Arc<Transport>,
}

impl DiagnosisClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `POST /diagnosis`. Inference is slow, so this call uses the longer
    /// diagnosis timeout.
    pub async fn diagnose(&self, request: &DiagnosisRequest) -> ApiResult {
        tracing::info!(
            has_plant_id = request.plant_id.is_some(),
            has_notes = !request.notes.is_empty(),
            image_kib = format!("{:.2}", request.base64_image.len() as f64 * 0.75 / 1024.0),
            "sending diagnosis request"
        );

        let timeout_ms = self.transport.config().diagnosis_timeout_ms;
        let outcome = match self.transport.json_request(HttpMethod::Post, DIAGNOSIS, request) {
            Ok(http_request) => {
                self.transport
                    .send(http_request.with_timeout_ms(timeout_ms))
                    .await
            }
            Err(error) => Err(error),
        };
        ApiResult::from_outcome(outcome, "diagnosing plant")
    }

    /// `GET /diagnosis/history/{plantId}`
    pub async fn plant_history(&self, plant_id: &str) -> ApiResult {
        if !self.transport.token_is_usable() {
            return ApiResult::invalid_token();
        }
        let path = match resource_path(HISTORY, plant_id, "") {
            Ok(path) => path,
            Err(error) => return rejected(&error, "fetching diagnosis history"),
        };
        let request = self.transport.request(HttpMethod::Get, &path);
        ApiResult::from_outcome(
            self.transport.send(request).await,
            "fetching diagnosis history",
        )
    }
}
