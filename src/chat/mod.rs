//! Headless chat screen: history, live room messages, composer and day grouping.

pub mod channel;
pub mod composer;
pub mod grouping;
pub mod history;
pub mod session;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::{Channel, Subscription};
pub use history::HistoryFetcher;
pub use session::{ChatSession, KeyOutcome, MessageLog, UnreadCounter};
