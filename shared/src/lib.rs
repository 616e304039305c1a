//! Shared types for the booking platform
//!
//! Common types used by the server and API consumers: domain models,
//! the unified error system, realtime event types, and ID/time utilities.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{EventType, RealtimeEvent};
