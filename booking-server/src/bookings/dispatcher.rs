//! Side-effect dispatcher
//!
//! Executes [`SideEffect`] descriptors strictly after the owning transition
//! committed. Failures are logged and swallowed: a durable booking change
//! never turns into an error response because a notification or push failed,
//! and nothing is retried in-request.

use shared::error::AppResult;
use shared::message::payload::MessageEventPayload;
use shared::message::{EventType, RealtimeEvent};
use shared::models::{ChatMessage, ChatMessageCreate, NotificationCreate, NotificationKind};
use sqlx::SqlitePool;

use super::effects::SideEffect;
use crate::db::repository::{chat_message, notification};
use crate::realtime::RealtimeHub;

/// Executes booking side effects against the database and the realtime hub
#[derive(Debug, Clone)]
pub struct EffectDispatcher {
    pool: SqlitePool,
    hub: RealtimeHub,
}

impl EffectDispatcher {
    pub fn new(pool: SqlitePool, hub: RealtimeHub) -> Self {
        Self { pool, hub }
    }

    /// Run effects sequentially, best-effort
    pub async fn dispatch(&self, effects: Vec<SideEffect>) {
        for effect in effects {
            if let Err(e) = self.execute(effect).await {
                tracing::warn!(error = %e, "Booking side effect failed, continuing");
            }
        }
    }

    async fn execute(&self, effect: SideEffect) -> AppResult<()> {
        match effect {
            SideEffect::Notify {
                user_id,
                kind,
                body,
                payload,
            } => {
                let data = serde_json::to_string(&payload).unwrap_or_else(|_| "null".into());
                notification::create(
                    &self.pool,
                    NotificationCreate {
                        user_id,
                        kind,
                        body,
                        data,
                    },
                )
                .await?;

                let event_type = match kind {
                    NotificationKind::BookingCreated => EventType::BookingCreated,
                    NotificationKind::BookingStatus => EventType::BookingStatus,
                    NotificationKind::NewMessage => EventType::ChatMessage,
                };
                self.hub
                    .publish(user_id, RealtimeEvent::new(event_type, &payload));
                Ok(())
            }
            SideEffect::Message {
                from_user_id,
                to_user_id,
                booking_id,
                body,
            } => self
                .deliver_message(from_user_id, to_user_id, Some(booking_id), body)
                .await
                .map(|_| ()),
        }
    }

    /// Store a chat message and fan out its NEW_MESSAGE notification and
    /// realtime push. Also the backing call for the direct-message endpoint.
    ///
    /// The message row is the source of truth; notification or push failures
    /// after the insert are logged and swallowed.
    pub async fn deliver_message(
        &self,
        from_user_id: i64,
        to_user_id: i64,
        booking_id: Option<i64>,
        body: String,
    ) -> AppResult<ChatMessage> {
        let message = chat_message::create(
            &self.pool,
            ChatMessageCreate {
                from_user_id,
                to_user_id,
                booking_id,
                body,
            },
        )
        .await?;

        let payload = MessageEventPayload {
            message_id: message.id,
            from_user_id,
            booking_id,
            body: message.body.clone(),
        };
        let data = serde_json::to_string(&payload).unwrap_or_else(|_| "null".into());

        if let Err(e) = notification::create(
            &self.pool,
            NotificationCreate {
                user_id: to_user_id,
                kind: NotificationKind::NewMessage,
                body: message.body.clone(),
                data,
            },
        )
        .await
        {
            tracing::warn!(error = %e, "Message notification failed, chat row kept");
        }

        self.hub
            .publish(to_user_id, RealtimeEvent::new(EventType::ChatMessage, &payload));

        Ok(message)
    }
}
