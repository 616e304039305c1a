//! Data models
//!
//! Shared between the server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps Unix millis.

pub mod booking;
pub mod chat_message;
pub mod notification;
pub mod room;
pub mod user;

// Re-exports
pub use booking::*;
pub use chat_message::*;
pub use notification::*;
pub use room::*;
pub use user::*;
