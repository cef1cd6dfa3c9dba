//! Router-level tests against an in-memory store

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use leasedesk_core::CivilClock;
use leasedesk_server::db::{create_memory_pool, migrations};
use leasedesk_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    app_with_clock(CivilClock::default()).await
}

async fn app_with_clock(clock: CivilClock) -> Router {
    let pool = create_memory_pool().await.expect("pool");
    migrations::run(&pool).await.expect("migrations");
    build_router(AppState::new(pool, clock))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn kim() -> Value {
    json!({
        "name": "Kim",
        "phone1": "010",
        "phone2": "1234",
        "phone3": "5678",
        "rent_type": "lease",
        "months": "36",
        "business_type": "individual"
    })
}

async fn list(app: &Router, status: &str) -> Vec<Value> {
    let (code, body) = send(app, Method::GET, &format!("/api/inquiries?status={status}"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["success"], true);
    body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn empty_list_is_success() {
    let app = app().await;
    let (code, body) = send(&app, Method::GET, "/api/inquiries", None).await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));
}

#[tokio::test]
async fn create_adds_exactly_one_pending_row() {
    let app = app().await;

    let (code, body) = send(&app, Method::POST, "/api/inquiries", Some(kim())).await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());

    let rows = list(&app, "all").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "pending");
    assert_eq!(rows[0]["memo"], Value::Null);
    assert_eq!(rows[0]["car_name"], Value::Null);

    let created_at = rows[0]["created_at"].as_str().unwrap();
    assert!(leasedesk_core::parse_timestamp(created_at).is_some());
    assert_eq!(created_at.len(), "YYYY-MM-DD HH:MM:SS".len());
}

#[tokio::test]
async fn create_with_missing_field_is_rejected() {
    let app = app().await;

    for field in ["name", "phone1", "phone2", "phone3", "rent_type", "months", "business_type"] {
        let mut body = kim();
        body.as_object_mut().unwrap().remove(field);

        let (code, resp) = send(&app, Method::POST, "/api/inquiries", Some(body)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(resp["success"], false);
        assert!(resp["error"].as_str().unwrap().contains(field));
    }

    assert!(list(&app, "all").await.is_empty());
}

#[tokio::test]
async fn malformed_body_is_400_envelope() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/inquiries")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_status_filter_matches_nothing() {
    let app = app().await;
    send(&app, Method::POST, "/api/inquiries", Some(kim())).await;

    let (code, body) = send(&app, Method::GET, "/api/inquiries?status=archived", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));

    // Exact match: case matters
    assert!(list(&app, "Pending").await.is_empty());
    assert_eq!(list(&app, "pending").await.len(), 1);
}

#[tokio::test]
async fn created_at_uses_configured_offset() {
    let expect_stamp = |offset_hours: i32| async move {
        let clock = CivilClock::from_offset_hours(offset_hours).unwrap();
        let app = app_with_clock(clock).await;
        let offset = Duration::hours(offset_hours.into());

        let before = Utc::now().naive_utc() + offset - Duration::seconds(1);
        send(&app, Method::POST, "/api/inquiries", Some(kim())).await;
        let after = Utc::now().naive_utc() + offset;

        let rows = list(&app, "all").await;
        let stamped = leasedesk_core::parse_timestamp(rows[0]["created_at"].as_str().unwrap())
            .expect("parsable created_at");
        assert!(
            before <= stamped && stamped <= after,
            "offset {offset_hours}: {stamped} not within {before}..{after}"
        );
    };

    expect_stamp(0).await;
    expect_stamp(-5).await;
    expect_stamp(9).await;
}

#[tokio::test]
async fn patch_shapes() {
    let app = app().await;
    send(&app, Method::POST, "/api/inquiries", Some(kim())).await;
    let id = list(&app, "all").await[0]["id"].as_i64().unwrap();

    // memo only
    let (code, _) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": id, "memo": "call back"}))).await;
    assert_eq!(code, StatusCode::OK);
    let row = &list(&app, "all").await[0];
    assert_eq!(row["status"], "pending");
    assert_eq!(row["memo"], "call back");

    // status only
    let (code, _) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": id, "status": "contacted"}))).await;
    assert_eq!(code, StatusCode::OK);
    let row = &list(&app, "all").await[0];
    assert_eq!(row["status"], "contacted");
    assert_eq!(row["memo"], "call back");

    // both
    let (code, _) = send(
        &app,
        Method::PATCH,
        "/api/inquiries",
        Some(json!({"id": id, "status": "completed", "memo": "signed"})),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    let row = &list(&app, "all").await[0];
    assert_eq!(row["status"], "completed");
    assert_eq!(row["memo"], "signed");

    // empty memo clears
    let (code, _) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": id, "memo": ""}))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(list(&app, "all").await[0]["memo"], Value::Null);
}

#[tokio::test]
async fn patch_validation() {
    let app = app().await;

    let (code, body) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"status": "pending"}))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID is required");

    let (code, body) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": 1}))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "status or memo is required");

    let (code, _) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": 1, "status": "lost"}))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_unknown_id_is_404() {
    let app = app().await;
    let (code, body) = send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": 99, "status": "completed"}))).await;

    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_removes_one_row_and_is_idempotent() {
    let app = app().await;
    send(&app, Method::POST, "/api/inquiries", Some(kim())).await;
    let mut other = kim();
    other["name"] = json!("Lee");
    send(&app, Method::POST, "/api/inquiries", Some(other)).await;

    let rows = list(&app, "all").await;
    let lee = rows.iter().find(|r| r["name"] == "Lee").unwrap()["id"].as_i64().unwrap();

    let (code, body) = send(&app, Method::DELETE, &format!("/api/inquiries?id={lee}"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["success"], true);

    let rows = list(&app, "all").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Kim");

    let (code, body) = send(&app, Method::DELETE, &format!("/api/inquiries?id={lee}"), None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn malformed_query_uses_envelope() {
    let app = app().await;
    let (code, body) = send(&app, Method::DELETE, "/api/inquiries?id=1&id=2", None).await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("invalid query string"));
}

#[tokio::test]
async fn delete_requires_id() {
    let app = app().await;

    let (code, body) = send(&app, Method::DELETE, "/api/inquiries", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID is required");

    let (code, _) = send(&app, Method::DELETE, "/api/inquiries?id=abc", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_is_newest_first_and_filters_exactly() {
    let app = app().await;
    for name in ["a", "b", "c"] {
        let mut body = kim();
        body["name"] = json!(name);
        send(&app, Method::POST, "/api/inquiries", Some(body)).await;
    }
    let rows = list(&app, "all").await;
    let b = rows.iter().find(|r| r["name"] == "b").unwrap()["id"].as_i64().unwrap();
    send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": b, "status": "contacted"}))).await;

    let rows = list(&app, "all").await;
    for pair in rows.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        assert!(first["created_at"].as_str().unwrap() >= second["created_at"].as_str().unwrap());
    }

    let contacted = list(&app, "contacted").await;
    assert_eq!(contacted.len(), 1);
    assert!(contacted.iter().all(|r| r["status"] == "contacted"));
}

#[tokio::test]
async fn end_to_end_lifecycle() {
    let app = app().await;
    send(&app, Method::POST, "/api/inquiries", Some(kim())).await;

    let all = list(&app, "all").await;
    assert_eq!(all[0]["name"], "Kim");
    assert_eq!(all[0]["status"], "pending");
    assert_eq!(all[0]["memo"], Value::Null);
    let id = all[0]["id"].as_i64().unwrap();

    send(&app, Method::PATCH, "/api/inquiries", Some(json!({"id": id, "status": "completed"}))).await;
    assert!(list(&app, "completed").await.iter().any(|r| r["id"] == id));
    assert!(!list(&app, "pending").await.iter().any(|r| r["id"] == id));

    send(&app, Method::DELETE, &format!("/api/inquiries?id={id}"), None).await;
    assert!(!list(&app, "all").await.iter().any(|r| r["id"] == id));
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/inquiries")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (code, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
