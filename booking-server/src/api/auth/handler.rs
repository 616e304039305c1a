//! Auth API Handlers

use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::verify_password;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, validation};
use shared::models::{UserCreate, UserPublic, UserRole};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/register — create an account
pub async fn register(
    State(state): State<ServerState>,
    axum::Json(req): axum::Json<RegisterRequest>,
) -> AppResult<ApiResponse<UserPublic>> {
    validation::check(&req)?;

    let user = user::create(
        &state.pool,
        UserCreate {
            username: req.username,
            password: req.password,
            display_name: req.display_name,
            role: req.role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = ?user.role, "User registered");
    Ok(ApiResponse::success(UserPublic::from(user)))
}

/// POST /api/auth/login — exchange credentials for an access token
pub async fn login(
    State(state): State<ServerState>,
    axum::Json(req): axum::Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    validation::check(&req)?;

    // Same error for unknown, inactive and wrong-password logins
    let user = user::find_by_username(&state.pool, &req.username)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            security_log!("WARN", "login_failed", username = req.username.clone());
            AppError::invalid_credentials()
        })?;

    if !verify_password(&req.password, &user.password_hash) {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(ApiResponse::success(LoginResponse {
        token,
        user: UserPublic::from(user),
    }))
}
