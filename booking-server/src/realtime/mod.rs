//! Realtime module
//!
//! Per-user event distribution for booking and chat pushes.

pub mod hub;

pub use hub::RealtimeHub;
