use super::*;
use crate::session::MemorySessionStore;
use crate::transport::MockHttpClient;
use ammowatch_shared::protocol::HttpMethod;
use ammowatch_shared::{ReportFilters, ReportScope, Role};
use serde_json::json;

// =========================================================
// Helpers
// =========================================================

const BASE: &str = "http://localhost:5000";

fn identity(role: Role) -> Identity {
    Identity {
        name: "Asha".into(),
        email: "asha@example.com".into(),
        role,
    }
}

fn logged_in(role: Role) -> AmmoniaApi<MockHttpClient, MemorySessionStore> {
    AmmoniaApi::new(
        MockHttpClient::new(),
        MemorySessionStore::with_session(Session::new("tok", identity(role))),
        &ClientConfig::default(),
    )
}

fn anonymous() -> AmmoniaApi<MockHttpClient, MemorySessionStore> {
    AmmoniaApi::new(
        MockHttpClient::new(),
        MemorySessionStore::new(),
        &ClientConfig::default(),
    )
}

// =========================================================
// Status handling
// =========================================================

#[tokio::test]
async fn test_bearer_header_attached() {
    let api = logged_in(Role::Worker);
    api.client()
        .mock_response(HttpMethod::Get, &format!("{BASE}/api/ammonia"), 200, json!([]));

    let readings = api.list_readings().await.unwrap();
    assert!(readings.is_empty());

    let req = api.client().last_request().unwrap();
    assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer tok");
}

#[tokio::test]
async fn test_401_clears_session() {
    let api = logged_in(Role::Admin);
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{BASE}/api/workers"),
        401,
        json!({"error": "Token expired"}),
    );

    let err = api.list_workers().await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(api.session().get().is_none());
}

#[tokio::test]
async fn test_authenticated_call_without_session_skips_network() {
    let api = anonymous();
    let err = api.list_users().await.unwrap_err();
    assert_eq!(err, ClientError::Unauthenticated);
    assert_eq!(api.client().request_count(), 0);
}

#[tokio::test]
async fn test_server_error_message_surfaces() {
    let api = logged_in(Role::Admin);
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/workers"),
        409,
        json!({"error": "Email already registered"}),
    );

    let payload = WorkerPayload {
        name: "Ravi".into(),
        email: "ravi@example.com".into(),
        password: Some("secret1".into()),
    };
    let err = api.create_worker(payload).await.unwrap_err();
    assert_eq!(err.user_message(), "Email already registered");
    assert!(api.session().get().is_some());
}

#[tokio::test]
async fn test_generic_message_for_opaque_error() {
    let api = logged_in(Role::Admin);
    api.client()
        .mock_raw(HttpMethod::Get, &format!("{BASE}/api/users"), 500, "oops");

    let err = api.list_users().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 500,
            message: GENERIC_FAILURE.into()
        }
    );
}

#[tokio::test]
async fn test_transport_failure() {
    let api = logged_in(Role::Worker);
    api.client().go_offline();
    let err = api.list_readings().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(api.session().get().is_some());
}

// =========================================================
// Session endpoints
// =========================================================

#[tokio::test]
async fn test_login_stores_session() {
    let api = anonymous();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/login"),
        200,
        json!({"token": "jwt-1", "user": {"name": "Asha", "email": "asha@example.com", "role": "worker"}}),
    );

    let form = LoginForm {
        email: " asha@example.com ".into(),
        password: "pw1234".into(),
    };
    let session = api.login(&form).await.unwrap();
    assert_eq!(session.role(), Some(Role::Worker));
    assert_eq!(api.session().token().as_deref(), Some("jwt-1"));

    let req = api.client().last_request().unwrap();
    assert!(!req.headers.contains_key("Authorization"));
    assert_eq!(
        req.json_body(),
        json!({"email": "asha@example.com", "password": "pw1234"})
    );
}

#[tokio::test]
async fn test_login_401_is_inline_error() {
    let api = anonymous();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/login"),
        401,
        json!({"error": "Invalid credentials"}),
    );

    let form = LoginForm {
        email: "a@example.com".into(),
        password: "wrong".into(),
    };
    let err = api.login(&form).await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!err.is_unauthenticated());
}

#[tokio::test]
async fn test_signup_validation_blocks_request() {
    let api = anonymous();
    let form = SignupForm {
        name: "Ravi".into(),
        email: "ravi@example.com".into(),
        password: "abcdef".into(),
        confirm_password: "abcdeg".into(),
    };
    let err = api.signup(&form).await.unwrap_err();
    assert_eq!(err.user_message(), "Passwords do not match");
    assert_eq!(api.client().request_count(), 0);
}

#[tokio::test]
async fn test_logout_clears_even_when_server_fails() {
    let api = logged_in(Role::User);
    api.client().go_offline();
    api.logout().await;
    assert!(api.session().get().is_none());
    assert_eq!(api.client().urls(), [format!("{BASE}/api/logout")]);
}

#[tokio::test]
async fn test_logout_sends_bearer_token() {
    let api = logged_in(Role::Worker);
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/logout"),
        200,
        json!({"message": "Logged out"}),
    );

    api.logout().await;

    let req = api.client().last_request().unwrap();
    assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer tok");
    assert!(api.session().get().is_none());
}

#[tokio::test]
async fn test_logout_without_session_stays_local() {
    let api = anonymous();
    api.logout().await;
    assert!(api.session().get().is_none());
    assert_eq!(api.client().request_count(), 0);
}

// =========================================================
// Reports
// =========================================================

#[tokio::test]
async fn test_manual_report_single_numeric_post() {
    let api = anonymous();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{BASE}/api/manual-report"),
        201,
        json!({"message": "Report submitted"}),
    );

    let form = ManualReportForm {
        name: "Asha".into(),
        email: "asha@example.com".into(),
        latitude: "18.5204".into(),
        longitude: "73.8567".into(),
        comments: "Smell near the canal".into(),
    };
    let resp = api.submit_manual_report(&form).await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Report submitted"));

    assert_eq!(api.client().request_count(), 1);
    let body = api.client().last_request().unwrap().json_body();
    assert_eq!(body["latitude"], json!(18.5204));
    assert_eq!(body["longitude"], json!(73.8567));
}

#[tokio::test]
async fn test_report_query_encoding() {
    let api = logged_in(Role::Worker);
    let query = ListReportsRequest {
        scope: ReportScope::Deactivated,
        filters: ReportFilters {
            city: "New Delhi".into(),
            postcode: String::new(),
            date_from: "2025-10-01".into(),
            date_to: String::new(),
        },
    };
    assert_eq!(
        api.url_for(&query),
        format!("{BASE}/api/deactivated-reports?city=New%20Delhi&date_from=2025-10-01")
    );
}

#[tokio::test]
async fn test_mutation_with_empty_body() {
    let api = logged_in(Role::Admin);
    let url = format!("{BASE}/api/reports/2025-10-14T10%3A00%3A00Z/deactivate");
    api.client().mock_raw(HttpMethod::Put, &url, 200, "");

    api.deactivate_report("2025-10-14T10:00:00Z").await.unwrap();
    let req = api.client().last_request().unwrap();
    assert_eq!(req.url, url);
    assert_eq!(req.method, HttpMethod::Put);
}

#[tokio::test]
async fn test_activity_log_limit() {
    let api = logged_in(Role::Admin);
    let url = format!("{BASE}/api/activity-logs?limit=100");
    api.client().mock_response(
        HttpMethod::Get,
        &url,
        200,
        json!([{"id": "l1", "event_type": "login", "actor": "asha@example.com", "timestamp": "2025-10-14T10:00:00Z"}]),
    );

    let logs = api.list_activity_logs(100).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].details.is_none());
}
