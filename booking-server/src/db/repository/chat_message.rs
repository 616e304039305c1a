//! Chat Message Repository

use super::{RepoError, RepoResult};
use shared::models::{ChatMessage, ChatMessageCreate};
use sqlx::SqlitePool;

const MESSAGE_SELECT: &str =
    "SELECT id, from_user_id, to_user_id, booking_id, body, created_at FROM messages";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ChatMessage>> {
    let sql = format!("{MESSAGE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ChatMessage>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Messages between two users in either direction, newest first
pub async fn list_conversation(
    pool: &SqlitePool,
    user_id: i64,
    peer_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<ChatMessage>> {
    let sql = format!(
        "{MESSAGE_SELECT} WHERE (from_user_id = ?1 AND to_user_id = ?2) OR (from_user_id = ?2 AND to_user_id = ?1) ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4"
    );
    let rows = sqlx::query_as::<_, ChatMessage>(&sql)
        .bind(user_id)
        .bind(peer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: ChatMessageCreate) -> RepoResult<ChatMessage> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO messages (id, from_user_id, to_user_id, booking_id, body, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(data.from_user_id)
    .bind(data.to_user_id)
    .bind(data.booking_id)
    .bind(&data.body)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create message".into()))
}
