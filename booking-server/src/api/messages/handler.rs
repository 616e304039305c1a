//! Chat message endpoints
//!
//! Direct messages between a client and an establishment. Messages sent
//! here go through the same delivery path as the automatic booking
//! messages: chat row, `NEW_MESSAGE` notification, realtime push.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::models::ChatMessageView;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{chat_message, user};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, Pagination, validation};

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub to_id: i64,
    #[validate(length(min = 1, max = 1000))]
    pub body: String,
}

/// Send a direct message to another user
pub async fn send(
    State(state): State<ServerState>,
    user: CurrentUser,
    axum::Json(req): axum::Json<SendMessageRequest>,
) -> AppResult<ApiResponse<ChatMessageView>> {
    validation::check(&req)?;

    let recipient = user::find_by_id(&state.pool, req.to_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let message = state
        .dispatcher()
        .deliver_message(user.id, recipient.id, None, req.body)
        .await?;

    Ok(ApiResponse::success(ChatMessageView::from(message)))
}

/// Conversation with one peer, newest first
pub async fn conversation(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(peer_id): Path<i64>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<ChatMessageView>>> {
    let messages =
        chat_message::list_conversation(&state.pool, user.id, peer_id, page.limit(), page.offset())
            .await?;

    Ok(ApiResponse::success(
        messages.into_iter().map(ChatMessageView::from).collect(),
    ))
}
