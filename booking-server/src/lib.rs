//! Posada Booking Server - reservation backend for lodging establishments
//!
//! # Architecture
//!
//! Main entry point of the booking server, wiring together:
//!
//! - **Booking lifecycle** (`bookings`): state machine, pricing, side effects
//! - **Database** (`db`): embedded SQLite storage via sqlx
//! - **Authentication** (`auth`): JWT + Argon2
//! - **Realtime** (`realtime`): per-user WebSocket event channels
//! - **HTTP API** (`api`): RESTful API surface
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/          # Configuration, state, startup
//! ├── auth/          # JWT authentication, password hashing
//! ├── bookings/      # Lifecycle engine, pricing, side effects
//! ├── api/           # HTTP routes and handlers
//! ├── realtime/      # WebSocket event hub
//! ├── utils/         # Logging, validation helpers
//! └── db/            # Connection pool, repositories
//! ```

pub mod api;
pub mod auth;
pub mod bookings;
pub mod core;
pub mod db;
pub mod realtime;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use bookings::{BookingManager, EffectDispatcher};
pub use core::{Config, Server, ServerState};
pub use realtime::RealtimeHub;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load environment and initialize logging
///
/// Reads `.env`, then configures the logger from `LOG_LEVEL` and
/// `LOG_TO_FILE` (daily files under `WORK_DIR/logs` when enabled).
/// Production environments log in JSON format.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    if config.log_to_file {
        config.ensure_work_dir_structure()?;
        let log_dir = config.log_dir();
        init_logger_with_file(&config.log_level, config.is_production(), log_dir.to_str())?;
    } else {
        init_logger(&config.log_level, config.is_production())?;
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____                       __
   / __ \____  _________  ____/ /___ _
  / /_/ / __ \/ ___/ __ `/ __  / __ `/
 / ____/ /_/ (__  ) /_/ / /_/ / /_/ /
/_/    \____/____/\__,_/\__,_/\__,_/
    "#
    );
}
