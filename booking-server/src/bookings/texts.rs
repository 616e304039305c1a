//! User-facing booking texts (Spanish)
//!
//! Every notification body and auto-generated chat message is composed here,
//! so wording changes stay out of the lifecycle engine.

use chrono::{DateTime, Utc};
use shared::models::{BookingStatus, BookingWithNames, DurationType, RejectReason};

/// Notification body for a newly created booking request
pub const CREATED_NOTIFICATION: &str = "Nueva solicitud de reserva";

/// Format an integer CLP amount with dot thousand separators: `$30.000`
pub fn format_clp(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Arrival phrase: `llegada HH:MM` (UTC) or a placeholder when unscheduled
fn start_phrase(start_at: Option<i64>) -> String {
    match start_at.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(dt) => format!("llegada {}", dt.format("%H:%M")),
        None => "hora por confirmar".to_string(),
    }
}

/// Chat message sent to the client when the owner accepts
pub fn accept_message(duration: DurationType, start_at: Option<i64>) -> String {
    format!(
        "Reserva confirmada: {}, {}.",
        duration.label_es(),
        start_phrase(start_at)
    )
}

/// Chat message sent to the client when the owner rejects.
///
/// Fixed reasons map to fixed texts; OTRO forwards the owner's note verbatim.
pub fn reject_message(reason: RejectReason, note: Option<&str>) -> String {
    match reason {
        RejectReason::Cerrado => "Local cerrado".to_string(),
        RejectReason::SinHabitaciones => "Sin habitaciones".to_string(),
        RejectReason::Otro => note.unwrap_or_default().to_string(),
    }
}

/// Chat summary sent from client to establishment on creation
pub fn creation_summary(booking: &BookingWithNames) -> String {
    let mut parts = vec![format!(
        "Solicitud de reserva: {}",
        booking.duration_type.label_es()
    )];
    if let Some(room) = &booking.room_name {
        parts.push(format!("habitación {room}"));
    }
    parts.push(start_phrase(booking.start_at));
    parts.push(format!("{} CLP", format_clp(booking.price_clp)));
    if let Some(note) = booking
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        parts.push(format!("nota: {note}"));
    }
    parts.join(" · ")
}

/// Notification body for a status change, addressed to the counterparty
pub fn status_notification(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pendiente => "Reserva pendiente",
        BookingStatus::Confirmada => "Tu reserva fue confirmada",
        BookingStatus::Rechazada => "Tu reserva fue rechazada",
        BookingStatus::Finalizada => "Tu reserva fue finalizada",
        BookingStatus::CanceladaCliente => "El cliente canceló la reserva",
    }
}
