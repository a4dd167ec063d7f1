use std::sync::Arc;

use crate::domain::PlantUpdate;
use crate::http_client::HttpMethod;
use crate::result::ApiResult;
use crate::transport::{resource_path, Transport};

use super::rejected;

const PLANTS: &str = "/plants";

/// Client for the garden log's plant records.
#[derive(Clone)]
pub struct PlantClient {
    transport: Arc<Transport>,
}

impl PlantClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET /plants`
    pub async fn list_plants(&self) -> ApiResult {
        if !self.transport.token_is_usable() {
            return ApiResult::invalid_token();
        }
        let request = self.transport.request(HttpMethod::Get, PLANTS);
        ApiResult::from_outcome(self.transport.send(request).await, "fetching plants")
    }

    /// `GET /plants/{id}`
    pub async fn get_plant(&self, id: &str) -> ApiResult {
        if !self.transport.token_is_usable() {
            return ApiResult::invalid_token();
        }
        let path = match resource_path(PLANTS, id, "") {
            Ok(path) => path,
            Err(error) => return rejected(&error, "fetching plant"),
        };
        let request = self.transport.request(HttpMethod::Get, &path);
        ApiResult::from_outcome(self.transport.send(request).await, "fetching plant")
    }

    /// `PUT /plants/{id}` with the fields set in `update`.
    pub async fn update_plant(&self, id: &str, update: &PlantUpdate) -> ApiResult {
        let path = match resource_path(PLANTS, id, "") {
            Ok(path) => path,
            Err(error) => return rejected(&error, "updating plant"),
        };
        let outcome = match self.transport.json_request(HttpMethod::Put, &path, update) {
            Ok(request) => self.transport.send(request).await,
            Err(error) => Err(error),
        };
        ApiResult::from_outcome(outcome, "updating plant")
    }
}
