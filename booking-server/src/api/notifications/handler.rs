//! Notification API Handlers

use axum::extract::{Path, Query, State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::notification;
use crate::utils::{ApiResponse, AppError, AppResult, Pagination};
use shared::error::ErrorCode;
use shared::models::NotificationView;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

/// GET /api/notifications — the caller's notifications, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<NotificationView>>> {
    let rows = notification::list_for_user(&state.pool, user.id, page.limit(), page.offset()).await?;
    Ok(ApiResponse::success(
        rows.into_iter().map(NotificationView::from).collect(),
    ))
}

/// GET /api/notifications/unread_count
pub async fn unread_count(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<UnreadCount>> {
    let count = notification::unread_count(&state.pool, user.id).await?;
    Ok(ApiResponse::success(UnreadCount { count }))
}

/// POST /api/notifications/:id/read — mark one of the caller's notifications read
pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<NotificationView>> {
    let found = notification::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound))?;

    if found.user_id != user.id {
        return Err(AppError::forbidden("Not your notification"));
    }

    notification::mark_read(&state.pool, id).await?;

    let updated = notification::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotificationNotFound))?;
    Ok(ApiResponse::success(NotificationView::from(updated)))
}
