//! Room Model
//!
//! Rooms are read-only to the booking core: resolution and pricing at
//! creation time only. There is no public room CRUD surface.

use serde::{Deserialize, Serialize};

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    pub establishment_id: i64,
    pub name: String,
    /// Tiered rates in CLP, any subset may be set
    pub price_3h: Option<i64>,
    pub price_6h: Option<i64>,
    pub price_night: Option<i64>,
    /// Single-rate fallback when the matching tier is unset
    pub price: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Insert payload for a room (provisioning/tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub establishment_id: i64,
    pub name: String,
    pub price_3h: Option<i64>,
    pub price_6h: Option<i64>,
    pub price_night: Option<i64>,
    pub price: Option<i64>,
}
