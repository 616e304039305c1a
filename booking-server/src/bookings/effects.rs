//! Side-effect derivation
//!
//! Pure functions from a committed booking state to the list of effects it
//! owes the parties. No I/O here: the [`EffectDispatcher`](super::dispatcher)
//! executes the descriptors after the transition is durable.
//!
//! A `Message` effect expands at dispatch time into the chat row, its
//! NEW_MESSAGE notification and a realtime push, since the message id only
//! exists after the insert.

use shared::message::payload::BookingEventPayload;
use shared::models::{BookingAction, BookingWithNames, NotificationKind};

use super::lifecycle::Capability;
use super::texts;

/// One deferred side effect of a booking change
#[derive(Debug, Clone)]
pub enum SideEffect {
    /// Persist a notification and push a realtime event to `user_id`
    Notify {
        user_id: i64,
        kind: NotificationKind,
        body: String,
        payload: BookingEventPayload,
    },
    /// Deliver a chat message (row + NEW_MESSAGE notification + push)
    Message {
        from_user_id: i64,
        to_user_id: i64,
        booking_id: i64,
        body: String,
    },
}

fn parties(booking: &BookingWithNames, role: Capability) -> (i64, i64) {
    match role {
        Capability::Owner => (booking.establishment_id, booking.client_id),
        Capability::Client => (booking.client_id, booking.establishment_id),
    }
}

/// Effects owed after a committed transition.
///
/// `booking` is the post-commit snapshot, so its status and reject fields
/// already reflect the transition.
pub fn for_transition(
    booking: &BookingWithNames,
    role: Capability,
    action: BookingAction,
) -> Vec<SideEffect> {
    let (actor, counterparty) = parties(booking, role);
    let payload = BookingEventPayload {
        booking_id: booking.id,
        status: booking.status,
        reject_reason: booking.reject_reason,
        reject_note: booking.reject_note.clone(),
    };

    let mut effects = vec![SideEffect::Notify {
        user_id: counterparty,
        kind: NotificationKind::BookingStatus,
        body: texts::status_notification(booking.status).to_string(),
        payload,
    }];

    match action {
        BookingAction::Accept => effects.push(SideEffect::Message {
            from_user_id: actor,
            to_user_id: counterparty,
            booking_id: booking.id,
            body: texts::accept_message(booking.duration_type, booking.start_at),
        }),
        BookingAction::Reject => {
            if let Some(reason) = booking.reject_reason {
                effects.push(SideEffect::Message {
                    from_user_id: actor,
                    to_user_id: counterparty,
                    booking_id: booking.id,
                    body: texts::reject_message(reason, booking.reject_note.as_deref()),
                });
            }
        }
        BookingAction::Finish | BookingAction::Cancel => {}
    }

    effects
}

/// Effects owed after a booking is created: notify the establishment and
/// open the chat with a request summary from the client.
pub fn for_creation(booking: &BookingWithNames) -> Vec<SideEffect> {
    vec![
        SideEffect::Notify {
            user_id: booking.establishment_id,
            kind: NotificationKind::BookingCreated,
            body: texts::CREATED_NOTIFICATION.to_string(),
            payload: BookingEventPayload::status_only(booking.id, booking.status),
        },
        SideEffect::Message {
            from_user_id: booking.client_id,
            to_user_id: booking.establishment_id,
            booking_id: booking.id,
            body: texts::creation_summary(booking),
        },
    ]
}
