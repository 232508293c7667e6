use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;
use tokio::sync::watch;

use crate::api::events::{CHAT_MESSAGE, OPEN_CHAT, ROOM_MESSAGE};
use crate::api::models::{ChatHistory, ChatMessage, ChatQuery, OpenChat, OutgoingMessage, User};
use crate::chat::channel::{Channel, Subscription};
use crate::chat::composer::{Composer, KeyAction, KeyPress, key_action};
use crate::chat::grouping::{DateGroup, MessageRow, group_by_date};
use crate::chat::history::HistoryFetcher;
use crate::chat::time::now_timestamp;
use crate::error::{ChatError, Result, ValidationError};

/// Unread-message badge shared with the rest of the app.
#[derive(Debug, Clone, Default)]
pub struct UnreadCounter(Arc<AtomicUsize>);

impl UnreadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, count: usize) {
        self.0.store(count, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.set(0);
    }
}

/// Flat, append-only message list. Every change bumps a version that views can await.
pub struct MessageLog {
    messages: Mutex<Vec<ChatMessage>>,
    version: watch::Sender<u64>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self { messages: Mutex::new(Vec::new()), version: watch::channel(0).0 }
    }
}

impl MessageLog {
    pub fn push(&self, message: ChatMessage) {
        self.lock().push(message);
        self.bump();
    }

    pub fn replace(&self, messages: Vec<ChatMessage>) {
        *self.lock() = messages;
        self.bump();
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    pub fn changes(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[derive(Debug)]
pub enum KeyOutcome {
    Submitted(std::result::Result<OutgoingMessage, ValidationError>),
    NewlineInserted,
    Ignored,
}

struct Attached {
    channel: Arc<dyn Channel>,
    _subscription: Subscription,
}

/// Headless state behind the chat screen for one signed-in student.
pub struct ChatSession {
    user: User,
    log: Arc<MessageLog>,
    composer: Composer,
    unread: UnreadCounter,
    attached: Option<Attached>,
}

impl ChatSession {
    pub fn new(user: User, unread: UnreadCounter) -> Self {
        Self {
            user,
            log: Arc::new(MessageLog::default()),
            composer: Composer::new(),
            unread,
            attached: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.snapshot()
    }

    pub fn log(&self) -> Arc<MessageLog> {
        self.log.clone()
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn is_connected(&self) -> bool {
        self.attached.is_some()
    }

    pub fn query(&self) -> ChatQuery {
        ChatQuery::for_user(&self.user)
    }

    pub async fn load_history<F: HistoryFetcher>(&self, fetcher: &F) {
        let result = fetcher.get_chat(&self.query()).await;
        self.apply_history(result);
    }

    /// Installs a fetched history. Failures are logged and leave the list as it was.
    pub fn apply_history(&self, result: Result<ChatHistory>) {
        match result {
            Ok(history) => {
                log::info!("Loaded {} messages for room {}", history.messages.len(), self.user.room());
                self.log.replace(history.messages);
            }
            Err(e) => log::error!("Failed to fetch chat: {e}"),
        }
    }

    /// Subscribes to room messages on `channel` and joins the room.
    ///
    /// Attaching the handle that is already attached is a no-op; attaching a
    /// different one releases the previous subscription first.
    pub fn attach_channel(&mut self, channel: Arc<dyn Channel>) {
        if let Some(current) = &self.attached {
            if std::ptr::addr_eq(Arc::as_ptr(&current.channel), Arc::as_ptr(&channel)) {
                return;
            }
        }
        self.attached = None;

        let messages = self.log.clone();
        let subscription = Subscription::new(
            channel.clone(),
            ROOM_MESSAGE,
            Box::new(move |data| match serde_json::from_value::<ChatMessage>(data) {
                Ok(message) => {
                    log::debug!("Received room message from {}", message.send_by);
                    messages.push(message);
                }
                Err(e) => log::warn!("Ignoring malformed room message: {e}"),
            }),
        );
        self.attached = Some(Attached { channel, _subscription: subscription });
        self.announce_presence();
    }

    pub fn detach_channel(&mut self) {
        self.attached = None;
    }

    /// Emits `open_chat` for the current room and clears the unread badge.
    pub fn announce_presence(&self) {
        let Some(attached) = &self.attached else {
            return;
        };
        let payload = OpenChat { user_id: self.user.id.clone(), room: self.user.room().to_string() };
        match serde_json::to_value(&payload)
            .map_err(ChatError::from)
            .and_then(|v| attached.channel.emit(OPEN_CHAT, v))
        {
            Ok(()) => log::info!("Joined room {}", payload.room),
            Err(e) => log::error!("Failed to announce presence: {e}"),
        }
        self.unread.reset();
    }

    /// Switches to another student: clears the list and rejoins the room.
    /// History must be loaded again afterwards; see [`ChatSession::change_user`].
    pub fn set_user(&mut self, user: User) {
        if user == self.user {
            return;
        }
        self.user = user;
        self.log.replace(Vec::new());
        self.composer.reset();
        self.announce_presence();
    }

    pub async fn change_user<F: HistoryFetcher>(&mut self, user: User, fetcher: &F) {
        if user == self.user {
            return;
        }
        self.set_user(user);
        self.load_history(fetcher).await;
    }

    /// Validates the draft and sends it.
    ///
    /// The composer is cleared once the send is attempted, whether or not the
    /// channel accepted it. Delivery is not acknowledged.
    pub fn submit(&mut self) -> std::result::Result<OutgoingMessage, ValidationError> {
        let text = self.composer.validate()?;
        let outgoing = OutgoingMessage {
            message: text,
            sender: self.user.id.clone(),
            receiver: self.user.mentor.id.clone(),
            room: self.user.room().to_string(),
            send_by: self.user.firstname.clone(),
            timestamp: now_timestamp(),
            socket_id: self.attached.as_ref().and_then(|a| a.channel.id()),
        };

        match &self.attached {
            Some(attached) => {
                if let Err(e) = serde_json::to_value(&outgoing)
                    .map_err(ChatError::from)
                    .and_then(|v| attached.channel.emit(CHAT_MESSAGE, v))
                {
                    log::error!("Failed to send message: {e}");
                }
            }
            None => log::warn!("Message not sent: {}", ChatError::NotConnected),
        }
        self.composer.reset();
        Ok(outgoing)
    }

    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        match key_action(press) {
            KeyAction::Submit => KeyOutcome::Submitted(self.submit()),
            KeyAction::InsertNewline => {
                self.composer.insert_newline();
                KeyOutcome::NewlineInserted
            }
            KeyAction::Default => KeyOutcome::Ignored,
        }
    }

    pub fn grouped(&self) -> Vec<DateGroup> {
        group_by_date(&self.log.snapshot(), Local::now().date_naive())
    }

    pub fn row<'a>(&self, message: &'a ChatMessage) -> MessageRow<'a> {
        MessageRow::new(message, &self.user.firstname)
    }
}
