//! Chat Message Model

use serde::{Deserialize, Serialize};

/// Chat message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChatMessage {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    /// Booking this message refers to, when sent by the dispatcher
    pub booking_id: Option<i64>,
    pub body: String,
    pub created_at: i64,
}

/// Insert payload for a chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageCreate {
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub booking_id: Option<i64>,
    pub body: String,
}

/// Chat message as rendered by the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageView {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub booking_id: Option<i64>,
    pub body: String,
    pub created_at: String,
}

impl From<ChatMessage> for ChatMessageView {
    fn from(m: ChatMessage) -> Self {
        Self {
            id: m.id,
            from_user_id: m.from_user_id,
            to_user_id: m.to_user_id,
            booking_id: m.booking_id,
            body: m.body,
            created_at: crate::util::millis_to_rfc3339(m.created_at),
        }
    }
}
