use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message: String,
    pub timestamp: String,
    pub send_by: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MentorRef {
    pub id: String,
}

/// The signed-in student. Owned by the session store; the chat view only reads it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub firstname: String,
    pub email: String,
    pub mentor: MentorRef,
}

impl User {
    /// Rooms are keyed by the student's email.
    pub fn room(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatQuery {
    pub mentor_id: String,
    pub student_id: String,
}

impl ChatQuery {
    pub fn for_user(user: &User) -> Self {
        Self {
            mentor_id: user.mentor.id.clone(),
            student_id: user.id.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub message: String,
    pub sender: String,
    pub receiver: String,
    pub room: String,
    pub send_by: String,
    pub timestamp: String,
    pub socket_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpenChat {
    pub user_id: String,
    pub room: String,
}

/// Who the student is talking to, shown in the chat header.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatPeer {
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub img: Option<String>,
}

impl Default for ChatPeer {
    fn default() -> Self {
        Self { title: "Mentor Chat".to_string(), status: String::new(), img: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_mongo_style_id() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "firstname": "Ada",
            "email": "ada@example.com",
            "mentor": { "id": "m1" }
        }))
        .unwrap();
        assert_eq!(user.id, "s1");
        assert_eq!(user.room(), "ada@example.com");
        assert_eq!(
            ChatQuery::for_user(&user),
            ChatQuery { mentor_id: "m1".into(), student_id: "s1".into() }
        );
    }

    #[test]
    fn peer_survives_toml_and_json() {
        let peer = ChatPeer {
            title: "Dr. Rivera".into(),
            status: "Online".into(),
            img: Some("https://cdn.example.com/rivera.png".into()),
        };
        let text = toml::to_string(&peer).unwrap();
        assert_eq!(toml::from_str::<ChatPeer>(&text).unwrap(), peer);
        let json = serde_json::to_string(&peer).unwrap();
        assert_eq!(serde_json::from_str::<ChatPeer>(&json).unwrap(), peer);
    }

    #[test]
    fn peer_only_needs_a_title() {
        let peer: ChatPeer = toml::from_str(r#"title = "Dr. Rivera""#).unwrap();
        assert_eq!(peer.status, "");
        assert!(peer.img.is_none());
    }

    #[test]
    fn history_without_messages_is_empty() {
        let history: ChatHistory = serde_json::from_str("{}").unwrap();
        assert!(history.messages.is_empty());
    }

    #[test]
    fn outgoing_message_uses_camel_case() {
        let out = OutgoingMessage {
            message: "hi".into(),
            sender: "s1".into(),
            receiver: "m1".into(),
            room: "ada@example.com".into(),
            send_by: "Ada".into(),
            timestamp: "2026-10-18T10:00:00+00:00".into(),
            socket_id: None,
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["sendBy"], "Ada");
        assert!(v["socketId"].is_null());
    }
}
