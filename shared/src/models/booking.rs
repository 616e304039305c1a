//! Booking Model

use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// `PENDIENTE` is the initial state; `RECHAZADA`, `FINALIZADA` and
/// `CANCELADA_CLIENTE` are terminal. Transitions are owned by the
/// lifecycle engine, never written directly by handlers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BookingStatus {
    Pendiente,
    Confirmada,
    Rechazada,
    Finalizada,
    CanceladaCliente,
}

impl BookingStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rechazada | BookingStatus::Finalizada | BookingStatus::CanceladaCliente
        )
    }
}

/// Billing granularity for a stay
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum DurationType {
    #[serde(rename = "3H")]
    #[cfg_attr(feature = "db", sqlx(rename = "3H"))]
    ThreeHours,
    #[serde(rename = "6H")]
    #[cfg_attr(feature = "db", sqlx(rename = "6H"))]
    SixHours,
    #[serde(rename = "NIGHT")]
    #[cfg_attr(feature = "db", sqlx(rename = "NIGHT"))]
    Night,
}

impl DurationType {
    /// Spanish label used in chat message bodies
    pub fn label_es(&self) -> &'static str {
        match self {
            DurationType::ThreeHours => "3 horas",
            DurationType::SixHours => "6 horas",
            DurationType::Night => "noche",
        }
    }
}

/// Reason an establishment gives when rejecting a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RejectReason {
    Cerrado,
    SinHabitaciones,
    Otro,
}

/// Action a party can invoke on a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingAction {
    Accept,
    Reject,
    Finish,
    Cancel,
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub establishment_id: i64,
    pub client_id: i64,
    pub room_id: Option<i64>,
    pub status: BookingStatus,
    pub duration_type: DurationType,
    /// Integer amount in Chilean pesos
    pub price_clp: i64,
    /// Requested start time (Unix millis)
    pub start_at: Option<i64>,
    pub note: Option<String>,
    /// Populated only when status is RECHAZADA
    pub reject_reason: Option<RejectReason>,
    pub reject_note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Insert payload for a new booking (always starts PENDIENTE)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub establishment_id: i64,
    pub client_id: i64,
    pub room_id: Option<i64>,
    pub duration_type: DurationType,
    pub price_clp: i64,
    pub start_at: Option<i64>,
    pub note: Option<String>,
}

/// Booking with party and room names (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingWithNames {
    pub id: i64,
    pub establishment_id: i64,
    pub client_id: i64,
    pub room_id: Option<i64>,
    pub status: BookingStatus,
    pub duration_type: DurationType,
    pub price_clp: i64,
    pub start_at: Option<i64>,
    pub note: Option<String>,
    pub reject_reason: Option<RejectReason>,
    pub reject_note: Option<String>,
    pub client_name: String,
    pub establishment_name: String,
    pub room_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Booking as rendered by the HTTP API (timestamps in ISO-8601)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingView {
    pub id: i64,
    pub establishment_id: i64,
    pub client_id: i64,
    pub room_id: Option<i64>,
    pub status: BookingStatus,
    pub duration_type: DurationType,
    pub price_clp: i64,
    pub start_at: Option<String>,
    pub note: Option<String>,
    pub reject_reason: Option<RejectReason>,
    pub reject_note: Option<String>,
    pub client_name: String,
    pub establishment_name: String,
    pub room_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookingWithNames> for BookingView {
    fn from(b: BookingWithNames) -> Self {
        Self {
            id: b.id,
            establishment_id: b.establishment_id,
            client_id: b.client_id,
            room_id: b.room_id,
            status: b.status,
            duration_type: b.duration_type,
            price_clp: b.price_clp,
            start_at: crate::util::opt_millis_to_rfc3339(b.start_at),
            note: b.note,
            reject_reason: b.reject_reason,
            reject_note: b.reject_note,
            client_name: b.client_name,
            establishment_name: b.establishment_name,
            room_name: b.room_name,
            created_at: crate::util::millis_to_rfc3339(b.created_at),
            updated_at: crate::util::millis_to_rfc3339(b.updated_at),
        }
    }
}
