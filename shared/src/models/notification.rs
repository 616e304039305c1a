//! Notification Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum NotificationKind {
    /// A booking was created for the recipient's establishment
    BookingCreated,
    /// A booking the recipient is party to changed status
    BookingStatus,
    /// The recipient received a chat message
    NewMessage,
}

/// Notification entity
///
/// `data` is a JSON text payload (booking id, status, message id as
/// applicable) for client deep-linking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    /// Recipient
    pub user_id: i64,
    pub kind: NotificationKind,
    /// Human-readable summary
    pub body: String,
    /// JSON payload as stored
    pub data: String,
    pub is_read: bool,
    pub created_at: i64,
}

/// Insert payload for a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreate {
    pub user_id: i64,
    pub kind: NotificationKind,
    pub body: String,
    pub data: String,
}

/// Notification as rendered by the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: i64,
    pub kind: NotificationKind,
    pub body: String,
    pub data: Value,
    pub is_read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationView {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            body: n.body,
            data: serde_json::from_str(&n.data).unwrap_or(Value::Null),
            is_read: n.is_read,
            created_at: crate::util::millis_to_rfc3339(n.created_at),
        }
    }
}
