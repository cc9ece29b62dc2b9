use super::helpers::{JWT_SECRET, empty_request, json_request, read_json, send, spawn_offline_app};
use axum::http::{StatusCode, header};
use maternal_api::{
    domain::user::entity::User, presentation::http::middleware::auth::issue_token,
};
use serde_json::{Value, json};

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = spawn_offline_app();
    for (method, uri) in [
        ("GET", "/api/v1/patients"),
        ("GET", "/api/v1/auth/me"),
        ("GET", "/api/v1/profile/records/anc"),
        ("DELETE", "/api/v1/anc/0194f123-4567-7abc-8def-0123456789ab"),
        ("GET", "/api/v1/notes/ldr/0194f123-4567-7abc-8def-0123456789ab"),
        ("GET", "/api/v1/admin/users"),
    ] {
        let res = send(&app.app, empty_request(method, uri, None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn unauthorized_responses_carry_a_json_error() {
    let app = spawn_offline_app();
    let res = send(
        &app.app,
        json_request("POST", "/api/v1/patients", None, json!({ "name": "Grace" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() {
    let app = spawn_offline_app();
    let user = User::new("intruder".into(), "x".into(), true);
    let forged = issue_token(&user, "not-the-secret", 12).unwrap();

    let res = send(
        &app.app,
        empty_request("GET", "/api/v1/admin/users", Some(&forged)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_tokens_are_rejected() {
    let app = spawn_offline_app();
    let user = User::new("nurse".into(), "x".into(), false);
    let expired = issue_token(&user, JWT_SECRET, -1).unwrap();

    let res = send(&app.app, empty_request("GET", "/api/v1/patients", Some(&expired))).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = spawn_offline_app();
    let res = send(&app.app, empty_request("GET", "/health", None)).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = read_json(res).await;
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = spawn_offline_app();

    let mut req = empty_request("GET", "/api/v1/patients", None);
    req.headers_mut()
        .insert("x-request-id", "trace-me-42".parse().unwrap());
    let res = send(&app.app, req).await;
    assert_eq!(res.headers()["x-request-id"], "trace-me-42");

    let res = send(&app.app, empty_request("GET", "/api/v1/patients", None)).await;
    assert!(res.headers().contains_key("x-request-id"));
    assert!(!res.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn malformed_bodies_get_a_json_error() {
    let app = spawn_offline_app();

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "username": 42, "password": ["x"] }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert!(body["error"].is_string());

    let res = send(&app.app, empty_request("POST", "/api/v1/auth/login", None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
}
