use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::Result;

pub type EventHandler = Box<dyn Fn(Value) + Send + Sync>;

/// A live real-time connection: named events in, named events out.
pub trait Channel: Send + Sync {
    /// Session id assigned to this connection, if any.
    fn id(&self) -> Option<String>;
    fn on(&self, event: &str, handler: EventHandler);
    /// Removes every handler registered for `event`.
    fn off(&self, event: &str);
    fn emit(&self, event: &str, payload: Value) -> Result<()>;
}

/// Handler registry shared by channel implementations.
#[derive(Default)]
pub struct Handlers {
    inner: Mutex<HashMap<String, Vec<Arc<EventHandler>>>>,
}

impl Handlers {
    pub fn insert(&self, event: &str, handler: EventHandler) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(event.to_string()).or_default().push(Arc::new(handler));
    }

    pub fn remove(&self, event: &str) -> bool {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(event).is_some()
    }

    pub fn contains(&self, event: &str) -> bool {
        let map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.get(event).is_some_and(|hs| !hs.is_empty())
    }

    /// Calls every handler for `event` outside the lock. Returns false when nobody listens.
    pub fn dispatch(&self, event: &str, data: Value) -> bool {
        let handlers = {
            let map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.get(event).cloned().unwrap_or_default()
        };
        if handlers.is_empty() {
            return false;
        }
        for handler in &handlers {
            handler(data.clone());
        }
        true
    }
}

/// Registration of one event on one channel; unregisters on drop.
pub struct Subscription {
    channel: Arc<dyn Channel>,
    event: &'static str,
}

impl Subscription {
    pub fn new(channel: Arc<dyn Channel>, event: &'static str, handler: EventHandler) -> Self {
        channel.on(event, handler);
        Self { channel, event }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        log::debug!("Unsubscribing from {}", self.event);
        self.channel.off(self.event);
    }
}
