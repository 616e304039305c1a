//! Booking Repository
//!
//! Status changes go through [`compare_and_set_status`], a guarded UPDATE that
//! only fires when the stored status still matches the caller's snapshot.

use super::{RepoError, RepoResult};
use shared::models::{Booking, BookingCreate, BookingStatus, BookingWithNames, RejectReason};
use sqlx::SqlitePool;

const BOOKING_SELECT: &str = "SELECT id, establishment_id, client_id, room_id, status, duration_type, price_clp, start_at, note, reject_reason, reject_note, created_at, updated_at FROM bookings";

const BOOKING_WITH_NAMES_SELECT: &str = "SELECT b.id, b.establishment_id, b.client_id, b.room_id, b.status, b.duration_type, b.price_clp, b.start_at, b.note, b.reject_reason, b.reject_note, c.display_name AS client_name, e.display_name AS establishment_name, r.name AS room_name, b.created_at, b.updated_at FROM bookings b JOIN users c ON b.client_id = c.id JOIN users e ON b.establishment_id = e.id LEFT JOIN rooms r ON b.room_id = r.id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!("{BOOKING_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_with_names(pool: &SqlitePool, id: i64) -> RepoResult<Option<BookingWithNames>> {
    let sql = format!("{BOOKING_WITH_NAMES_SELECT} WHERE b.id = ?");
    let row = sqlx::query_as::<_, BookingWithNames>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_for_establishment(
    pool: &SqlitePool,
    establishment_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<BookingWithNames>> {
    let sql = format!(
        "{BOOKING_WITH_NAMES_SELECT} WHERE b.establishment_id = ? ORDER BY b.created_at DESC, b.id DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, BookingWithNames>(&sql)
        .bind(establishment_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_for_client(
    pool: &SqlitePool,
    client_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<BookingWithNames>> {
    let sql = format!(
        "{BOOKING_WITH_NAMES_SELECT} WHERE b.client_id = ? ORDER BY b.created_at DESC, b.id DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, BookingWithNames>(&sql)
        .bind(client_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: BookingCreate) -> RepoResult<Booking> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO bookings (id, establishment_id, client_id, room_id, status, duration_type, price_clp, start_at, note, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
    )
    .bind(id)
    .bind(data.establishment_id)
    .bind(data.client_id)
    .bind(data.room_id)
    .bind(BookingStatus::Pendiente)
    .bind(data.duration_type)
    .bind(data.price_clp)
    .bind(data.start_at)
    .bind(data.note)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

/// Atomically move a booking from `expected` to `next`.
///
/// Returns false when the stored status no longer matches `expected`, which
/// means another writer got there first (or the transition was stale).
/// Reject metadata is written in the same statement so a rejection is never
/// visible without its reason.
pub async fn compare_and_set_status(
    pool: &SqlitePool,
    id: i64,
    expected: BookingStatus,
    next: BookingStatus,
    reject: Option<(RejectReason, Option<String>)>,
) -> RepoResult<bool> {
    let (reject_reason, reject_note) = match reject {
        Some((reason, note)) => (Some(reason), note),
        None => (None, None),
    };

    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE bookings SET status = ?1, reject_reason = ?2, reject_note = ?3, updated_at = ?4 WHERE id = ?5 AND status = ?6",
    )
    .bind(next)
    .bind(reject_reason)
    .bind(reject_note)
    .bind(now)
    .bind(id)
    .bind(expected)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
