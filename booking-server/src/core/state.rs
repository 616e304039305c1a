use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::bookings::{BookingManager, EffectDispatcher};
use crate::core::Config;
use crate::db::DbService;
use crate::realtime::RealtimeHub;

/// Server state - shared handle to every service
///
/// ServerState is cloned into each request handler. All fields are cheap
/// to clone (pool handles, Arcs, DashMap handles).
///
/// # Components
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | pool | SqlitePool | SQLite connection pool |
/// | jwt_service | Arc<JwtService> | JWT authentication service |
/// | hub | RealtimeHub | Per-user realtime event channels |
/// | dispatcher | EffectDispatcher | Notification / chat side effect runner |
/// | bookings | BookingManager | Booking lifecycle engine |
///
/// # Example
///
/// ```ignore
/// let jwt = state.get_jwt_service();
/// let booking = state.bookings().execute(&user, id, input).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT authentication service (Arc shared ownership)
    pub jwt_service: Arc<JwtService>,
    /// Realtime event hub
    pub hub: RealtimeHub,
    /// Side effect dispatcher
    pub dispatcher: EffectDispatcher,
    /// Booking lifecycle engine
    pub bookings: BookingManager,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Order:
    /// 1. Work directory layout (ensure directories exist)
    /// 2. Database (work_dir/database/posada.db, migrations applied)
    /// 3. Services (JWT, hub, dispatcher, booking manager)
    ///
    /// # Panics
    ///
    /// Panics when the work directory cannot be created or the database
    /// fails to initialize
    pub async fn initialize(config: Config) -> Self {
        // 1. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 2. Initialize DB
        let db_path = config.database_path();
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let pool = db_service.pool;

        // 3. Initialize services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let hub = RealtimeHub::new();
        let dispatcher = EffectDispatcher::new(pool.clone(), hub.clone());
        let bookings = BookingManager::new(pool.clone(), dispatcher.clone());

        Self {
            config,
            pool,
            jwt_service,
            hub,
            dispatcher,
            bookings,
        }
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Get the realtime hub
    pub fn hub(&self) -> &RealtimeHub {
        &self.hub
    }

    /// Get the side effect dispatcher
    pub fn dispatcher(&self) -> &EffectDispatcher {
        &self.dispatcher
    }

    /// Get the booking lifecycle engine
    pub fn bookings(&self) -> &BookingManager {
        &self.bookings
    }
}
