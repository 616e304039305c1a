//! Booking price resolution
//!
//! Rooms carry per-duration CLP tariffs plus a generic fallback price. A
//! missing tariff falls back to the generic price, and a fully unpriced room
//! books at 0 so pricing gaps never block a reservation.

use shared::models::{DurationType, Room};

/// Price in CLP for booking `room` for the given duration
pub fn price_for(room: &Room, duration: DurationType) -> i64 {
    let tier = match duration {
        DurationType::ThreeHours => room.price_3h,
        DurationType::SixHours => room.price_6h,
        DurationType::Night => room.price_night,
    };
    tier.or(room.price).unwrap_or(0)
}
