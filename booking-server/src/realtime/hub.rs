//! RealtimeHub — per-user event fan-out
//!
//! One broadcast channel per connected user. Booking and chat side effects
//! publish here; WebSocket sessions subscribe and forward frames.
//!
//! ```text
//! BookingManager / EffectDispatcher
//!       │ RealtimeEvent
//!       ▼
//! RealtimeHub
//!   └── channels: user_id → broadcast::Sender<RealtimeEvent>
//!             │
//!             ▼
//!       WS handler (subscribe → serialize → push)
//! ```

use dashmap::DashMap;
use shared::message::RealtimeEvent;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcast channel capacity — enough to absorb a slow consumer briefly
const CHANNEL_CAPACITY: usize = 64;

/// Global realtime hub — events are strictly per-user
#[derive(Debug, Clone, Default)]
pub struct RealtimeHub {
    /// user_id → broadcast sender for that user's sessions
    channels: Arc<DashMap<i64, broadcast::Sender<RealtimeEvent>>>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a user's event stream (called on WS connect).
    ///
    /// Multiple concurrent sessions for the same user each get every event.
    pub fn subscribe(&self, user_id: i64) -> broadcast::Receiver<RealtimeEvent> {
        self.channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Push an event to a user. Returns the number of sessions that got it.
    ///
    /// Publishing to a user with no open sessions is a no-op; delivery is
    /// best-effort and the durable copy lives in the notifications table.
    pub fn publish(&self, user_id: i64, event: RealtimeEvent) -> usize {
        match self.channels.get(&user_id) {
            Some(tx) => tx.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop a user's channel once their last session is gone
    pub fn disconnect(&self, user_id: i64) {
        self.channels
            .remove_if(&user_id, |_, tx| tx.receiver_count() == 0);
    }

    /// Number of users with at least one live session
    pub fn connected_users(&self) -> usize {
        self.channels
            .iter()
            .filter(|entry| entry.value().receiver_count() > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::EventType;
    use shared::message::payload::BookingEventPayload;
    use shared::models::BookingStatus;

    fn make_event(booking_id: i64) -> RealtimeEvent {
        RealtimeEvent::new(
            EventType::BookingStatus,
            BookingEventPayload::status_only(booking_id, BookingStatus::Confirmada),
        )
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let hub = RealtimeHub::new();
        assert_eq!(hub.publish(1, make_event(10)), 0);
        assert_eq!(hub.connected_users(), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_own_events_only() {
        let hub = RealtimeHub::new();
        let mut rx = hub.subscribe(1);

        assert_eq!(hub.publish(1, make_event(10)), 1);
        assert_eq!(hub.publish(2, make_event(20)), 0);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::BookingStatus);
        assert_eq!(event.data["booking_id"], 10);
    }

    #[tokio::test]
    async fn multiple_sessions_fan_out() {
        let hub = RealtimeHub::new();
        let mut first = hub.subscribe(7);
        let mut second = hub.subscribe(7);

        assert_eq!(hub.publish(7, make_event(1)), 2);
        assert_eq!(first.recv().await.unwrap().data["booking_id"], 1);
        assert_eq!(second.recv().await.unwrap().data["booking_id"], 1);
    }

    #[test]
    fn disconnect_cleans_up_idle_channels() {
        let hub = RealtimeHub::new();
        let rx = hub.subscribe(3);
        assert_eq!(hub.connected_users(), 1);

        // Still subscribed: disconnect must keep the channel
        hub.disconnect(3);
        assert_eq!(hub.connected_users(), 1);

        drop(rx);
        hub.disconnect(3);
        assert_eq!(hub.connected_users(), 0);
    }
}
