use serde::{Deserialize, Serialize};

pub const ROOM_MESSAGE: &str = "room_message";
pub const OPEN_CHAT: &str = "open_chat";
pub const CHAT_MESSAGE: &str = "chat_message";

/// Text frame exchanged over the socket: `{"event": "...", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self { event: event.into(), data }
    }

    pub fn encode(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_frame_without_data() {
        let env = Envelope::decode(r#"{"event":"ping"}"#).unwrap();
        assert_eq!(env.event, "ping");
        assert!(env.data.is_null());
    }

    #[test]
    fn rejects_frames_without_event() {
        assert!(Envelope::decode(r#"{"data":1}"#).is_err());
    }
}
