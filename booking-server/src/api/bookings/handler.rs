//! Booking API Handlers
//!
//! Thin HTTP layer over [`BookingManager`]; all lifecycle rules live there.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::bookings::{ActionInput, NewBooking};
use crate::core::ServerState;
use crate::db::repository::booking;
use crate::utils::{ApiResponse, AppError, AppResult, Pagination, validation};
use shared::error::ErrorCode;
use shared::models::{BookingAction, BookingView, DurationType, RejectReason};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub room_id: Option<i64>,
    pub duration_type: DurationType,
    /// ISO-8601 timestamp, optional
    pub start_at: Option<String>,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActionRequest {
    pub action: BookingAction,
    pub reject_reason: Option<RejectReason>,
    #[validate(length(max = 500))]
    pub reject_note: Option<String>,
}

/// POST /api/establishments/:id/bookings — request a booking as the caller
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(establishment_id): Path<i64>,
    axum::Json(req): axum::Json<CreateBookingRequest>,
) -> AppResult<ApiResponse<BookingView>> {
    validation::check(&req)?;

    let start_at = req
        .start_at
        .as_deref()
        .map(|s| validation::parse_rfc3339_millis(s, "start_at"))
        .transpose()?;

    let booking = state
        .bookings()
        .create(
            &user,
            establishment_id,
            NewBooking {
                room_id: req.room_id,
                duration_type: req.duration_type,
                start_at,
                note: req.note,
            },
        )
        .await?;

    Ok(ApiResponse::success(BookingView::from(booking)))
}

/// POST /api/bookings/:id/action — run a lifecycle action
pub async fn action(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(booking_id): Path<i64>,
    axum::Json(req): axum::Json<ActionRequest>,
) -> AppResult<ApiResponse<BookingView>> {
    validation::check(&req)?;

    let booking = state
        .bookings()
        .execute(
            &user,
            booking_id,
            ActionInput {
                action: req.action,
                reject_reason: req.reject_reason,
                reject_note: req.reject_note,
            },
        )
        .await?;

    Ok(ApiResponse::success(BookingView::from(booking)))
}

/// GET /api/bookings — caller-scoped listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<BookingView>>> {
    let rows = if user.is_owner() {
        booking::list_for_establishment(&state.pool, user.id, page.limit(), page.offset()).await?
    } else {
        booking::list_for_client(&state.pool, user.id, page.limit(), page.offset()).await?
    };

    Ok(ApiResponse::success(
        rows.into_iter().map(BookingView::from).collect(),
    ))
}

/// GET /api/bookings/:id — single booking, parties only
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(booking_id): Path<i64>,
) -> AppResult<ApiResponse<BookingView>> {
    let row = booking::find_with_names(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    let is_establishment = user.is_owner() && user.id == row.establishment_id;
    if !is_establishment && user.id != row.client_id {
        return Err(AppError::forbidden("Not a party to this booking"));
    }

    Ok(ApiResponse::success(BookingView::from(row)))
}
