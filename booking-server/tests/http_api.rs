//! HTTP surface tests
//!
//! Exercise the assembled application: response envelope, authentication
//! gate, and the register → login → book → accept flow over real requests.

use axum::Router;
use axum::body::Body;
use booking_server::db::repository::room;
use booking_server::{Config, ServerState};
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use shared::models::RoomCreate;
use tempfile::TempDir;
use tower::Service;

async fn test_app() -> (Router, ServerState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(config).await;
    let app = booking_server::api::build_app(state.clone());
    (app, state, dir)
}

async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Register an account and log it in, returning `(user_id, token)`
async fn register_and_login(
    app: &mut Router,
    username: &str,
    display_name: &str,
    role: &str,
) -> (i64, String) {
    let (status, body) = send(
        app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "username": username,
                "password": "clave-segura",
                "display_name": display_name,
                "role": role,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    let user_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        app,
        post_json(
            "/api/auth/login",
            None,
            json!({ "username": username, "password": "clave-segura" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["username"], username);

    (user_id, token)
}

async fn seed_room(state: &ServerState, establishment_id: i64) {
    room::create(
        &state.pool,
        RoomCreate {
            establishment_id,
            name: "Matrimonial".to_string(),
            price_3h: Some(15_000),
            price_6h: Some(22_000),
            price_night: Some(30_000),
            price: Some(18_000),
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn health_is_public_and_enveloped() {
    let (mut app, _state, _dir) = test_app().await;

    let (status, body) = send(&mut app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");
}

#[tokio::test]
async fn requests_carry_a_request_id() {
    let (mut app, _state, _dir) = test_app().await;

    let response = app.call(get("/api/health", None)).await.unwrap();
    let header = response.headers().get("x-request-id");
    assert!(header.is_some(), "x-request-id missing from response");
    assert!(!header.unwrap().to_str().unwrap().is_empty());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (mut app, _state, _dir) = test_app().await;

    // No Authorization header
    let (status, body) = send(&mut app, get("/api/bookings", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    // Wrong scheme
    let request = Request::builder()
        .method("GET")
        .uri("/api/bookings")
        .header(header::AUTHORIZATION, "Basic abc")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    // Garbage bearer token
    let (status, body) = send(&mut app, get("/api/bookings", Some("no.real.token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (mut app, _state, _dir) = test_app().await;
    register_and_login(&mut app, "viajera", "Viajera Austral", "CLIENT").await;

    let (status, body) = send(
        &mut app,
        post_json(
            "/api/auth/login",
            None,
            json!({ "username": "viajera", "password": "clave-equivocada" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Unknown users get the same error
    let (status, body) = send(
        &mut app,
        post_json(
            "/api/auth/login",
            None,
            json!({ "username": "nadie", "password": "clave-segura" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Duplicate registration conflicts
    let (status, _body) = send(
        &mut app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "username": "viajera",
                "password": "clave-segura",
                "display_name": "Otra Persona",
                "role": "CLIENT",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_login_book_accept_over_http() {
    let (mut app, state, _dir) = test_app().await;

    let (owner_id, owner_token) =
        register_and_login(&mut app, "descanso", "Motel El Descanso", "OWNER").await;
    let (_client_id, client_token) =
        register_and_login(&mut app, "viajera", "Viajera Austral", "CLIENT").await;
    seed_room(&state, owner_id).await;

    // Client requests a night
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/establishments/{owner_id}/bookings"),
            Some(&client_token),
            json!({
                "duration_type": "NIGHT",
                "start_at": "2026-08-23T22:30:00Z",
                "note": "con mascota",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {body}");
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "PENDIENTE");
    assert_eq!(body["data"]["price_clp"], 30_000);
    assert_eq!(body["data"]["establishment_name"], "Motel El Descanso");
    assert_eq!(body["data"]["room_name"], "Matrimonial");
    let booking_id = body["data"]["id"].as_i64().unwrap();

    // The request shows up in the owner's notifications
    let (status, body) = send(&mut app, get("/api/notifications", Some(&owner_token))).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert!(
        items
            .iter()
            .any(|n| n["kind"] == "BOOKING_CREATED" && n["body"] == "Nueva solicitud de reserva")
    );
    let notification_id = items[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &mut app,
        get("/api/notifications/unread_count", Some(&owner_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["count"].as_i64().unwrap() >= 1);

    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/notifications/{notification_id}/read"),
            Some(&owner_token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_read"], true);

    // The wrong party cannot act
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/bookings/{booking_id}/action"),
            Some(&client_token),
            json!({ "action": "ACCEPT" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    // The owner accepts
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/bookings/{booking_id}/action"),
            Some(&owner_token),
            json!({ "action": "ACCEPT" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "accept failed: {body}");
    assert_eq!(body["data"]["status"], "CONFIRMADA");

    // Both parties see the booking; listings are scoped to the caller
    let (status, body) = send(&mut app, get("/api/bookings", Some(&client_token))).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "CONFIRMADA");

    let (status, body) = send(
        &mut app,
        get(&format!("/api/bookings/{booking_id}"), Some(&owner_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64(), Some(booking_id));

    // A third account is not a party and cannot read it
    let (_stranger_id, stranger_token) =
        register_and_login(&mut app, "intruso", "Otro Viajero", "CLIENT").await;
    let (status, body) = send(
        &mut app,
        get(&format!("/api/bookings/{booking_id}"), Some(&stranger_token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);
}

#[tokio::test]
async fn reject_payload_is_validated_over_http() {
    let (mut app, state, _dir) = test_app().await;

    let (owner_id, owner_token) =
        register_and_login(&mut app, "descanso", "Motel El Descanso", "OWNER").await;
    let (_client_id, client_token) =
        register_and_login(&mut app, "viajera", "Viajera Austral", "CLIENT").await;
    seed_room(&state, owner_id).await;

    let (_status, body) = send(
        &mut app,
        post_json(
            &format!("/api/establishments/{owner_id}/bookings"),
            Some(&client_token),
            json!({ "duration_type": "3H" }),
        ),
    )
    .await;
    assert_eq!(body["data"]["price_clp"], 15_000);
    let booking_id = body["data"]["id"].as_i64().unwrap();

    // REJECT without a reason
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/bookings/{booking_id}/action"),
            Some(&owner_token),
            json!({ "action": "REJECT" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4003);

    // OTRO without a usable note
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/bookings/{booking_id}/action"),
            Some(&owner_token),
            json!({ "action": "REJECT", "reject_reason": "OTRO", "reject_note": "   " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4004);

    // A complete payload goes through
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/bookings/{booking_id}/action"),
            Some(&owner_token),
            json!({ "action": "REJECT", "reject_reason": "OTRO", "reject_note": "sin aseo" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "RECHAZADA");
    assert_eq!(body["data"]["reject_reason"], "OTRO");
    assert_eq!(body["data"]["reject_note"], "sin aseo");

    // Terminal bookings refuse further actions
    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/bookings/{booking_id}/action"),
            Some(&client_token),
            json!({ "action": "CANCEL" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn bookings_refuse_establishments_without_rooms() {
    let (mut app, _state, _dir) = test_app().await;

    let (owner_id, _owner_token) =
        register_and_login(&mut app, "sinpiezas", "Hostal Sin Piezas", "OWNER").await;
    let (_client_id, client_token) =
        register_and_login(&mut app, "viajera", "Viajera Austral", "CLIENT").await;

    let (status, body) = send(
        &mut app,
        post_json(
            &format!("/api/establishments/{owner_id}/bookings"),
            Some(&client_token),
            json!({ "duration_type": "NIGHT" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5001);

    // And unknown establishments 404
    let (status, body) = send(
        &mut app,
        post_json(
            "/api/establishments/424242/bookings",
            Some(&client_token),
            json!({ "duration_type": "NIGHT" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3003);
}

#[tokio::test]
async fn direct_messages_roundtrip_over_http() {
    let (mut app, _state, _dir) = test_app().await;

    let (owner_id, owner_token) =
        register_and_login(&mut app, "descanso", "Motel El Descanso", "OWNER").await;
    let (client_id, client_token) =
        register_and_login(&mut app, "viajera", "Viajera Austral", "CLIENT").await;

    let (status, body) = send(
        &mut app,
        post_json(
            "/api/messages",
            Some(&client_token),
            json!({ "to_id": owner_id, "body": "¿Tienen estacionamiento techado?" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "send failed: {body}");
    assert_eq!(body["data"]["body"], "¿Tienen estacionamiento techado?");
    assert_eq!(body["data"]["from_user_id"].as_i64(), Some(client_id));

    // Visible from both sides of the conversation
    let (status, body) = send(
        &mut app,
        get(&format!("/api/messages/{client_id}"), Some(&owner_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["body"], "¿Tienen estacionamiento techado?");

    // The owner was notified of the new message
    let (status, body) = send(&mut app, get("/api/notifications", Some(&owner_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["kind"] == "NEW_MESSAGE")
    );

    // An empty body fails validation
    let (status, body) = send(
        &mut app,
        post_json(
            "/api/messages",
            Some(&client_token),
            json!({ "to_id": owner_id, "body": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    // Messaging an unknown account fails cleanly
    let (status, body) = send(
        &mut app,
        post_json(
            "/api/messages",
            Some(&client_token),
            json!({ "to_id": 424242, "body": "hola" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}
