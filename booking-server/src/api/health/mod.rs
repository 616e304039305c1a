//! Health check route
//!
//! # Routes
//!
//! | Path | Method | Description | Auth |
//! |------|--------|-------------|------|
//! | /api/health | GET | Liveness and database check | none |

use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::ApiResponse;

/// Health routes — public (no authentication)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Status (ok | degraded)
    status: &'static str,
    /// Server version
    version: &'static str,
    /// Database check (ok | error)
    database: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> ApiResponse<HealthResponse> {
    // A trivial query proves the pool still answers
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database probe failed");
            "error"
        }
    };

    let status = if database == "ok" { "ok" } else { "degraded" };

    ApiResponse::success(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
