//! Queue-backed [`NotificationSink`] for the presentation layer.

use std::sync::{Arc, Mutex};

use siren_common::{Notification, NotificationQueue};
use tracing::warn;

use crate::providers::NotificationSink;

/// Pushes notifications into a queue the presentation layer renders from.
#[derive(Debug, Clone)]
pub struct QueueSink {
    queue: Arc<Mutex<NotificationQueue>>,
}

impl QueueSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(NotificationQueue::new(capacity))),
        }
    }

    /// Shared handle to the underlying queue.
    pub fn queue(&self) -> Arc<Mutex<NotificationQueue>> {
        Arc::clone(&self.queue)
    }

    /// Messages currently queued, oldest first.
    pub fn messages(&self) -> Vec<String> {
        match self.queue.lock() {
            Ok(mut queue) => queue.visible().iter().map(|n| n.message.clone()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Empties the queue, returning every message including expired ones.
    pub fn take_all(&self) -> Vec<String> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain().into_iter().map(|n| n.message).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl NotificationSink for QueueSink {
    fn notify(&self, message: &str) {
        match self.queue.lock() {
            Ok(mut queue) => queue.push(Notification::new(message)),
            Err(_) => warn!("notification queue poisoned, dropping: {message}"),
        }
    }
}
