//! Typed payloads for realtime events

use crate::models::{BookingStatus, RejectReason};
use serde::{Deserialize, Serialize};

/// Payload for `booking_created` and `booking_status` events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEventPayload {
    pub booking_id: i64,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_note: Option<String>,
}

impl BookingEventPayload {
    /// Payload carrying only the booking id and its (new) status
    pub fn status_only(booking_id: i64, status: BookingStatus) -> Self {
        Self {
            booking_id,
            status,
            reject_reason: None,
            reject_note: None,
        }
    }
}

/// Payload for `chat_message` events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEventPayload {
    pub message_id: i64,
    pub from_user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_payload_omits_empty_reject_fields() {
        let payload = BookingEventPayload::status_only(7, BookingStatus::Confirmada);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"status\":\"CONFIRMADA\""));
        assert!(!json.contains("reject_reason"));
        assert!(!json.contains("reject_note"));
    }

    #[test]
    fn booking_payload_carries_reject_fields() {
        let payload = BookingEventPayload {
            booking_id: 7,
            status: BookingStatus::Rechazada,
            reject_reason: Some(RejectReason::Otro),
            reject_note: Some("sin estacionamiento".into()),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"reject_reason\":\"OTRO\""));
        assert!(json.contains("sin estacionamiento"));
    }
}
