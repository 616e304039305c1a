//! Booking manager
//!
//! Orchestrates booking creation and lifecycle actions: authorization,
//! transition resolution, the guarded status write, and post-commit side
//! effects. HTTP handlers stay thin and call into here; integration tests
//! drive the manager directly.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    BookingAction, BookingCreate, BookingWithNames, DurationType, RejectReason, UserRole,
};
use sqlx::SqlitePool;

use super::dispatcher::EffectDispatcher;
use super::{effects, lifecycle, pricing, resolver};
use crate::auth::CurrentUser;
use crate::db::repository::{booking, user};

/// Input for creating a booking request
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: Option<i64>,
    pub duration_type: DurationType,
    /// Requested start time (UTC millis)
    pub start_at: Option<i64>,
    pub note: Option<String>,
}

/// Input for a lifecycle action on an existing booking
#[derive(Debug, Clone)]
pub struct ActionInput {
    pub action: BookingAction,
    pub reject_reason: Option<RejectReason>,
    pub reject_note: Option<String>,
}

/// Booking domain service
#[derive(Debug, Clone)]
pub struct BookingManager {
    pool: SqlitePool,
    dispatcher: EffectDispatcher,
}

impl BookingManager {
    pub fn new(pool: SqlitePool, dispatcher: EffectDispatcher) -> Self {
        Self { pool, dispatcher }
    }

    /// Create a PENDIENTE booking for `client` at `establishment_id`.
    ///
    /// The room is resolved (requested or default), the price is fixed at
    /// creation time, and the establishment is notified after the insert.
    pub async fn create(
        &self,
        client: &CurrentUser,
        establishment_id: i64,
        input: NewBooking,
    ) -> AppResult<BookingWithNames> {
        let establishment = user::find_by_id(&self.pool, establishment_id)
            .await?
            .filter(|u| u.role == UserRole::Owner && u.is_active)
            .ok_or_else(|| AppError::new(ErrorCode::EstablishmentNotFound))?;

        let room = resolver::resolve_room(&self.pool, establishment.id, input.room_id).await?;
        let price_clp = pricing::price_for(&room, input.duration_type);

        let created = booking::create(
            &self.pool,
            BookingCreate {
                establishment_id: establishment.id,
                client_id: client.id,
                room_id: Some(room.id),
                duration_type: input.duration_type,
                price_clp,
                start_at: input.start_at,
                note: input.note,
            },
        )
        .await?;

        tracing::info!(
            booking_id = created.id,
            establishment_id = establishment.id,
            client_id = client.id,
            room_id = room.id,
            price_clp,
            "Booking created"
        );

        let named = self.read_with_names(created.id).await?;
        self.dispatcher.dispatch(effects::for_creation(&named)).await;
        Ok(named)
    }

    /// Apply a lifecycle action for `caller` to booking `booking_id`.
    ///
    /// Order matters: authorization, then transition lookup, then REJECT
    /// field validation, and only then the guarded write. A lost write race
    /// surfaces as `InvalidTransition`, same as a stale action.
    pub async fn execute(
        &self,
        caller: &CurrentUser,
        booking_id: i64,
        input: ActionInput,
    ) -> AppResult<BookingWithNames> {
        let current = booking::find_by_id(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

        let role = lifecycle::capability(caller, &current)
            .ok_or_else(|| AppError::forbidden("Not a party to this booking"))?;

        let next = lifecycle::resolve_transition(role, input.action, current.status)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidTransition))?;

        let reject = if input.action == BookingAction::Reject {
            Some(lifecycle::validate_reject_fields(
                input.reject_reason,
                input.reject_note.as_deref(),
            )?)
        } else {
            None
        };

        let won =
            booking::compare_and_set_status(&self.pool, booking_id, current.status, next, reject)
                .await?;
        if !won {
            return Err(AppError::new(ErrorCode::InvalidTransition));
        }

        tracing::info!(
            booking_id,
            action = ?input.action,
            from = ?current.status,
            to = ?next,
            user_id = caller.id,
            "Booking transition applied"
        );

        let named = self.read_with_names(booking_id).await?;
        self.dispatcher
            .dispatch(effects::for_transition(&named, role, input.action))
            .await;
        Ok(named)
    }

    async fn read_with_names(&self, booking_id: i64) -> AppResult<BookingWithNames> {
        booking::find_with_names(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))
    }
}
