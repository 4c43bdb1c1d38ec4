use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::SessionId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    SharingStarted {
        session_id: SessionId,
    },
    SharingStopped {
        session_id: SessionId,
        elapsed_seconds: u64,
    },
    PositionCaptured {
        latitude: f64,
        longitude: f64,
        accuracy_meters: f64,
    },
    CaptureFailed(String),
    PermissionDenied,
    Shutdown,
    #[serde(other)]
    Unknown,
}

/// Fan-out of app events to any number of presentation-layer listeners.
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
