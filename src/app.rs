use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use directories::BaseDirs;

use crate::api::models::{ChatPeer, User};
use crate::error::{ChatError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppState {
    pub base_url: String,
    #[serde(default)]
    pub socket_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Stands in for the signed-in session on the desktop.
    #[serde(default)]
    pub user: Option<User>,
    /// Mentor shown in the chat header.
    #[serde(default)]
    pub peer: Option<ChatPeer>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("mentor-chat.toml"))
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::new(),
        }
    }

    /// Reads the TOML file at `path`; a missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::info!("No config at {} ({e}); using defaults", path.display());
                return Self::new();
            }
        };
        match toml::from_str::<AppState>(&text) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Failed to parse config {}: {e}", path.display());
                Self::new()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| ChatError::Config("no config dir".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        !self.base_url.is_empty() && self.user.is_some()
    }

    pub fn peer(&self) -> ChatPeer {
        self.peer.clone().unwrap_or_default()
    }

    /// Explicit socket URL, or one derived from the server URL.
    pub fn socket_url(&self) -> Result<String> {
        match &self.socket_url {
            Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
            _ => crate::utils::websocket_url(&self.base_url),
        }
    }
}
