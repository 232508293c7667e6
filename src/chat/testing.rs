//! In-memory doubles for the channel and the history fetcher.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::api::models::{ChatHistory, ChatMessage, ChatQuery};
use crate::chat::channel::{Channel, EventHandler, Handlers};
use crate::chat::history::HistoryFetcher;
use crate::error::{ChatError, Result};

#[derive(Default)]
pub struct MemoryChannel {
    id: Option<String>,
    handlers: Handlers,
    emitted: Mutex<Vec<(String, Value)>>,
}

impl MemoryChannel {
    pub fn with_id(id: &str) -> Self {
        Self { id: Some(id.to_string()), ..Self::default() }
    }

    /// Simulates an inbound event from the server.
    pub fn deliver(&self, event: &str, data: Value) -> bool {
        self.handlers.dispatch(event, data)
    }

    pub fn has_handler(&self, event: &str) -> bool {
        self.handlers.contains(event)
    }

    pub fn emitted(&self, event: &str) -> Vec<Value> {
        self.emitted
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl Channel for MemoryChannel {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn on(&self, event: &str, handler: EventHandler) {
        self.handlers.insert(event, handler);
    }

    fn off(&self, event: &str) {
        self.handlers.remove(event);
    }

    fn emit(&self, event: &str, payload: Value) -> Result<()> {
        self.emitted.lock().unwrap().push((event.to_string(), payload));
        Ok(())
    }
}

/// Serves a fixed history, or fails when constructed with `failing()`.
pub struct StaticFetcher {
    history: Option<Vec<ChatMessage>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<ChatQuery>>,
}

impl StaticFetcher {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { history: Some(messages), calls: AtomicUsize::new(0), last_query: Mutex::new(None) }
    }

    pub fn failing() -> Self {
        Self { history: None, calls: AtomicUsize::new(0), last_query: Mutex::new(None) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ChatQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

impl HistoryFetcher for StaticFetcher {
    fn get_chat(&self, query: &ChatQuery) -> impl Future<Output = Result<ChatHistory>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        let result = match &self.history {
            Some(messages) => Ok(ChatHistory { messages: messages.clone() }),
            None => Err(ChatError::Status(500)),
        };
        async move { result }
    }
}

pub fn message(text: &str, timestamp: &str, send_by: &str) -> ChatMessage {
    ChatMessage {
        message: text.to_string(),
        timestamp: timestamp.to_string(),
        send_by: send_by.to_string(),
    }
}
