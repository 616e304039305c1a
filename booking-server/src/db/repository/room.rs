//! Room Repository
//!
//! Rooms are provisioned per establishment and only consulted during booking
//! creation; there is no public CRUD surface for them.

use super::{RepoError, RepoResult};
use shared::models::{Room, RoomCreate};
use sqlx::SqlitePool;

const ROOM_SELECT: &str = "SELECT id, establishment_id, name, price_3h, price_6h, price_night, price, is_active, created_at, updated_at FROM rooms";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let sql = format!("{ROOM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Room>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Oldest active room of an establishment, the default assignment target
pub async fn find_first_active(
    pool: &SqlitePool,
    establishment_id: i64,
) -> RepoResult<Option<Room>> {
    let sql = format!(
        "{ROOM_SELECT} WHERE establishment_id = ? AND is_active = 1 ORDER BY created_at ASC, id ASC LIMIT 1"
    );
    let row = sqlx::query_as::<_, Room>(&sql)
        .bind(establishment_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO rooms (id, establishment_id, name, price_3h, price_6h, price_night, price, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(data.establishment_id)
    .bind(&data.name)
    .bind(data.price_3h)
    .bind(data.price_6h)
    .bind(data.price_night)
    .bind(data.price)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

/// Enable or disable a room. Returns false if the room does not exist.
pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let result = sqlx::query("UPDATE rooms SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(active)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
