use std::future::Future;

use crate::api::models::{ChatHistory, ChatQuery};
use crate::error::Result;

/// Source of the stored conversation between a mentor and a student.
pub trait HistoryFetcher {
    fn get_chat(&self, query: &ChatQuery) -> impl Future<Output = Result<ChatHistory>> + Send;
}
