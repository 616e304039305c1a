//! Realtime event types
//!
//! Shared between the server and connected clients. Events are pushed
//! per-user over the WebSocket endpoint as JSON frames.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Realtime event kinds pushed to booking parties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A new booking was created for the recipient's establishment
    BookingCreated,
    /// A booking the recipient is party to changed status
    BookingStatus,
    /// The recipient received a chat message
    ChatMessage,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::BookingCreated => write!(f, "booking_created"),
            EventType::BookingStatus => write!(f, "booking_status"),
            EventType::ChatMessage => write!(f, "chat_message"),
        }
    }
}

/// Event envelope delivered to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeEvent {
    pub event_type: EventType,
    pub data: Value,
    /// Unique id for client-side dedup and tracing
    pub event_id: Uuid,
}

impl RealtimeEvent {
    /// Create a new event with a serialized payload
    pub fn new(event_type: EventType, data: impl Serialize) -> Self {
        Self {
            event_type,
            data: serde_json::to_value(data).unwrap_or(Value::Null),
            event_id: Uuid::new_v4(),
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
