//! Booking domain module
//!
//! The lifecycle engine and everything it owes the parties:
//! - [`lifecycle`] — transition table, capabilities, REJECT validation
//! - [`manager`] — creation and action orchestration over the guarded write
//! - [`effects`] / [`dispatcher`] — pure effect derivation and best-effort execution
//! - [`resolver`] / [`pricing`] / [`texts`] — room choice, CLP pricing, Spanish copy

pub mod dispatcher;
pub mod effects;
pub mod lifecycle;
pub mod manager;
pub mod pricing;
pub mod resolver;
pub mod texts;

pub use dispatcher::EffectDispatcher;
pub use effects::SideEffect;
pub use lifecycle::Capability;
pub use manager::{ActionInput, BookingManager, NewBooking};
