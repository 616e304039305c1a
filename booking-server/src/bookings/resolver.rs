//! Room resolution for new bookings
//!
//! A request may name a room, but the request never fails because of a bad
//! room reference: anything unusable silently falls back to the
//! establishment's default room. Only a total absence of active rooms
//! rejects the booking.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Room;
use sqlx::SqlitePool;

use crate::db::repository::room;

/// Pick the room a new booking gets.
///
/// The requested room is honored only when it exists, belongs to the
/// establishment and is active; otherwise the oldest active room is used.
pub async fn resolve_room(
    pool: &SqlitePool,
    establishment_id: i64,
    requested: Option<i64>,
) -> AppResult<Room> {
    if let Some(room_id) = requested
        && let Some(candidate) = room::find_by_id(pool, room_id).await?
        && candidate.establishment_id == establishment_id
        && candidate.is_active
    {
        return Ok(candidate);
    }

    room::find_first_active(pool, establishment_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NoRoomsAvailable))
}
