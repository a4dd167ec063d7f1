use std::sync::Arc;

use crate::clients::{DiagnosisClient, PlantClient, ReminderClient};
use crate::config::ClientConfig;
use crate::events::EventBus;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::token::TokenStore;
use crate::transport::Transport;

/// Composition root: one shared transport and event bus, and the service
/// façades built on top of them.
#[derive(Clone)]
pub struct SproutyClient {
    transport: Arc<Transport>,
}

impl SproutyClient {
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self::from_transport(Transport::new(config, http, tokens))
    }

    /// Production client over reqwest.
    pub fn with_reqwest(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()), tokens)
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn events(&self) -> &EventBus {
        self.transport.events()
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    pub fn reminders(&self) -> ReminderClient {
        ReminderClient::new(Arc::clone(&self.transport))
    }

    pub fn plants(&self) -> PlantClient {
        PlantClient::new(Arc::clone(&self.transport))
    }

    pub fn diagnosis(&self) -> DiagnosisClient {
        DiagnosisClient::new(Arc::clone(&self.transport))
    }
}
