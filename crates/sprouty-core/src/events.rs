use serde::Serialize;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 32;

/// Notification published by the transport when a call fails in a way the
/// UI may want to surface globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// No response could be obtained; usually offline or a blocked CORS preflight.
    NetworkUnreachable { origin: String, api: String },
    /// The backend answered 401.
    AuthExpired,
}

/// Event channel owned by one client instance.
///
/// Subscribers that fall behind lose the oldest events; listeners are
/// expected to be idempotent.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ClientEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ClientEvent) {
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
