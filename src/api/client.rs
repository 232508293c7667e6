use reqwest::Client as HttpClient;

use crate::api::models::{ChatHistory, ChatQuery};
use crate::app::AppState;
use crate::chat::history::HistoryFetcher;
use crate::error::{ChatError, Result};

pub struct ApiClient {
    pub http: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.base_url, state.token.clone())
    }

    pub fn with_http(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    fn base_api(base_url: &str) -> String {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.ends_with("/api") { trimmed.to_string() } else { format!("{}/api", trimmed) }
    }

    fn with_auth(mut req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        if let Some(t) = token {
            req = req.header("Authorization", format!("Bearer {}", t));
        }
        req
    }

    pub fn chat_endpoint(&self) -> String {
        format!("{}/v1/chat", Self::base_api(&self.base_url))
    }

    /// Try to reach the chat server using common ping endpoints.
    pub async fn ping(&self) -> Result<u16> {
        let base_api = Self::base_api(&self.base_url);
        let candidates = [format!("{}/v1/ping", base_api), format!("{}/ping", base_api), self.base_url.clone()];
        let mut last_err: Option<ChatError> = None;
        for endpoint in candidates {
            let req = Self::with_auth(self.http.get(&endpoint), self.token.as_deref());
            match req.send().await {
                Ok(resp) => return Ok(resp.status().as_u16()),
                Err(e) => last_err = Some(e.into()),
            }
        }
        Err(last_err.unwrap_or_else(|| ChatError::Config("no endpoint to ping".into())))
    }

    /// Fetch the conversation between a mentor and a student.
    pub async fn get_chat(&self, query: &ChatQuery) -> Result<ChatHistory> {
        let req = self.http.get(self.chat_endpoint()).query(query);
        let resp = Self::with_auth(req, self.token.as_deref()).send().await?;
        if !resp.status().is_success() {
            return Err(ChatError::Status(resp.status().as_u16()));
        }
        let history = resp.json::<ChatHistory>().await?;
        log::debug!("Fetched {} messages for student {}", history.messages.len(), query.student_id);
        Ok(history)
    }

    /// Download an avatar or other image by absolute URL.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ChatError::Status(resp.status().as_u16()));
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

impl HistoryFetcher for ApiClient {
    async fn get_chat(&self, query: &ChatQuery) -> Result<ChatHistory> {
        ApiClient::get_chat(self, query).await
    }
}
