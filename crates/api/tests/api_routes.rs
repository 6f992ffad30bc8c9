//! Route-level integration tests: full stack over a mocked backend

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use frontdesk_app::{router, AppContext};
use frontdesk_domain::{
    AuthConfig, Config, RealtimeConfig, ServerConfig, StoreConfig,
};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a context wired to the mock backend; realtime off so tests control
/// every request.
async fn context_for(server: &MockServer) -> Arc<AppContext> {
    let config = Config {
        store: StoreConfig {
            base_url: format!("{}/rest", server.uri()),
            service_key: "sk-test".to_string(),
            timeout_secs: 5,
            max_attempts: 1,
        },
        auth: AuthConfig {
            base_url: format!("{}/auth", server.uri()),
            api_key: "pk-test".to_string(),
            timeout_secs: 5,
        },
        realtime: RealtimeConfig { enabled: false, reconnect_backoff_ms: 100 },
        server: ServerConfig::default(),
    };
    AppContext::new(config).await.expect("context")
}

/// Mount the session plumbing: token resolution plus the profile row.
async fn mount_session(server: &MockServer, user_id: Uuid, org: Uuid, role: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": user_id
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/user_profiles"))
        .and(query_param("id", format!("eq.{user_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": user_id,
            "organization_id": org,
            "email": "staff@frontdesk.dev",
            "full_name": "Staff Member",
            "role": role,
            "phone": null,
            "is_active": true
        }])))
        .mount(server)
        .await;
}

fn appointment_row(id: Uuid, org: Uuid) -> serde_json::Value {
    let now = Utc::now();
    serde_json::json!({
        "id": id,
        "organization_id": org,
        "customer_name": "Dana Webb",
        "customer_phone": "4155550142",
        "customer_email": null,
        "scheduled_at": now,
        "duration_minutes": 30,
        "service_type": null,
        "status": "scheduled",
        "notes": null,
        "reminders_sent": [],
        "created_at": now,
        "updated_at": now
    })
}

#[tokio::test]
async fn health_needs_no_auth() {
    let server = MockServer::start().await;
    let app = router(context_for(&server).await);

    let response =
        app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_bearer_token_is_unauthorized() {
    let server = MockServer::start().await;
    let app = router(context_for(&server).await);

    let response =
        app.oneshot(Request::get("/appointments").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn appointment_list_is_scoped_to_the_caller() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let org = Uuid::new_v4();
    mount_session(&server, user_id, org, "agent").await;

    Mock::given(method("GET"))
        .and(path("/rest/appointments"))
        .and(query_param("organization_id", format!("eq.{org}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([appointment_row(Uuid::new_v4(), org)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = router(context_for(&server).await);
    let response = app
        .oneshot(
            Request::get("/appointments")
                .header("authorization", "Bearer jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn short_duration_create_is_rejected_before_the_store() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let org = Uuid::new_v4();
    mount_session(&server, user_id, org, "agent").await;

    // The store must never see the insert.
    Mock::given(method("POST"))
        .and(path("/rest/appointments"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let body = serde_json::json!({
        "customer_name": "John Doe",
        "customer_phone": "1234567890",
        "customer_email": "john@example.com",
        "scheduled_at": Utc::now(),
        "duration_minutes": 10,
        "service_type": null,
        "notes": null
    });

    let app = router(context_for(&server).await);
    let response = app
        .oneshot(
            Request::post("/appointments")
                .header("authorization", "Bearer jwt")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(payload["message"].as_str().unwrap().contains("15"));
}

#[tokio::test]
async fn cross_org_status_update_is_forbidden() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let org = Uuid::new_v4();
    mount_session(&server, user_id, org, "agent").await;

    // The appointment lives in a different organization.
    let foreign_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/rest/appointments"))
        .and(query_param("id", format!("eq.{foreign_id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([appointment_row(foreign_id, Uuid::new_v4())])),
        )
        .mount(&server)
        .await;

    let app = router(context_for(&server).await);
    let response = app
        .oneshot(
            Request::post(format!("/appointments/{foreign_id}/status"))
                .header("authorization", "Bearer jwt")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"status":"confirmed"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["error"], "permission_denied");
}

#[tokio::test]
async fn unknown_status_string_is_a_validation_error() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let org = Uuid::new_v4();
    mount_session(&server, user_id, org, "agent").await;

    let app = router(context_for(&server).await);
    let response = app
        .oneshot(
            Request::post(format!("/appointments/{}/status", Uuid::new_v4()))
                .header("authorization", "Bearer jwt")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"status":"tentative"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn session_endpoint_returns_the_resolved_profile() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let org = Uuid::new_v4();
    mount_session(&server, user_id, org, "org_admin").await;

    let app = router(context_for(&server).await);
    let response = app
        .oneshot(
            Request::get("/auth/session")
                .header("authorization", "Bearer jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let profile: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(profile["role"], "org_admin");
    assert_eq!(profile["organization_id"], serde_json::json!(org));
}

#[tokio::test]
async fn analytics_falls_back_to_store_queries_without_realtime() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let org = Uuid::new_v4();
    mount_session(&server, user_id, org, "agent").await;

    Mock::given(method("GET"))
        .and(path("/rest/appointments"))
        .and(query_param("organization_id", format!("eq.{org}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([appointment_row(Uuid::new_v4(), org)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/calls"))
        .and(query_param("organization_id", format!("eq.{org}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let app = router(context_for(&server).await);
    let response = app
        .oneshot(
            Request::get("/analytics")
                .header("authorization", "Bearer jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let overview: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(overview["appointments"]["total"], 1);
    assert_eq!(overview["calls"]["total"], 0);
    assert_eq!(overview["calls"]["success_rate"], 0.0);
}
