//! Realtime WebSocket endpoint
//!
//! `GET /api/realtime/ws?token=<JWT>` upgrades to a one-way event feed:
//! every [`RealtimeEvent`] published for the authenticated user is pushed
//! as a JSON text frame. The token travels in the query string because
//! browser WebSocket clients cannot set an Authorization header.

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::auth::{CurrentUser, JwtError};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Keepalive interval for idle connections
const PING_INTERVAL_SECS: u64 = 30;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/realtime/ws", get(handle_ws))
}

#[derive(Deserialize)]
pub struct WsAuthQuery {
    token: String,
}

/// GET /api/realtime/ws?token=<JWT> — upgrade to the event feed
async fn handle_ws(
    State(state): State<ServerState>,
    Query(query): Query<WsAuthQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let claims = state
        .get_jwt_service()
        .validate_token(&query.token)
        .map_err(|e| {
            security_log!("WARN", "ws_auth_failed", error = format!("{}", e));
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;

    let user = CurrentUser::try_from(claims)
        .map_err(|_| AppError::invalid_token("Invalid subject claim"))?;

    Ok(ws.on_upgrade(move |socket| ws_session(socket, state, user)))
}

async fn ws_session(socket: WebSocket, state: ServerState, user: CurrentUser) {
    tracing::info!(user_id = user.id, username = %user.username, "Realtime WS connected");

    let mut events = state.hub().subscribe(user.id);
    let (mut sink, mut stream) = socket.split();

    let mut ping_interval = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = events.recv() => {
                match event {
                    Ok(event) => {
                        let Ok(json) = event.to_json() else {
                            tracing::warn!(user_id = user.id, "Unserializable realtime event dropped");
                            continue;
                        };
                        if sink.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Receiver resumes from the oldest retained event
                        tracing::warn!(user_id = user.id, skipped, "Realtime subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::warn!(user_id = user.id, "Realtime WS error: {e}");
                        break;
                    }
                    _ => {} // Text, Binary, Pong — the feed is one-way
                }
            }
        }
    }

    // Send Close frame (best-effort)
    let _ = sink.close().await;
    state.hub().disconnect(user.id);

    tracing::info!(user_id = user.id, "Realtime WS disconnected");
}
