use super::*;
use crate::config::ClientConfig;
use crate::session::MemorySessionStore;
use crate::transport::MockHttpClient;
use ammowatch_shared::protocol::HttpMethod;
use ammowatch_shared::{Role, Session};
use serde_json::json;

const VERIFY_URL: &str = "http://localhost:5000/api/verify-token";

fn api_with(session: Option<Session>) -> AmmoniaApi<MockHttpClient, MemorySessionStore> {
    let store = match session {
        Some(s) => MemorySessionStore::with_session(s),
        None => MemorySessionStore::new(),
    };
    AmmoniaApi::new(MockHttpClient::new(), store, &ClientConfig::default())
}

fn stored(role: Role) -> Option<Session> {
    Some(Session::new(
        "tok",
        Identity {
            name: "Stale".into(),
            email: "old@example.com".into(),
            role,
        },
    ))
}

fn verify_ok(api: &AmmoniaApi<MockHttpClient, MemorySessionStore>, role: &str) {
    api.client().mock_response(
        HttpMethod::Get,
        VERIFY_URL,
        200,
        json!({"user": {"name": "Fresh", "email": "fresh@example.com", "role": role}}),
    );
}

#[tokio::test]
async fn test_no_token_redirects_without_network() {
    let api = api_with(None);
    let outcome = AuthGateway::new(&api).admit(View::Dashboard).await;
    assert_eq!(outcome, Admission::Redirect(View::Login));
    assert_eq!(api.client().request_count(), 0);
}

#[tokio::test]
async fn test_granted_overwrites_identity() {
    let api = api_with(stored(Role::Worker));
    verify_ok(&api, "worker");

    let outcome = AuthGateway::new(&api).admit(View::Reports).await;
    let identity = match outcome {
        Admission::Granted(identity) => identity,
        other => panic!("expected admission, got {other:?}"),
    };
    assert_eq!(identity.name, "Fresh");

    let session = api.session().get().unwrap();
    assert_eq!(session.token, "tok");
    assert_eq!(session.user.unwrap().email, "fresh@example.com");
}

#[tokio::test]
async fn test_rejected_token_clears_session() {
    let api = api_with(stored(Role::Admin));
    api.client()
        .mock_response(HttpMethod::Get, VERIFY_URL, 401, json!({"error": "Invalid token"}));

    let outcome = AuthGateway::new(&api).admit(View::AdminManage).await;
    assert_eq!(outcome, Admission::Redirect(View::Login));
    assert!(api.session().get().is_none());
}

#[tokio::test]
async fn test_malformed_verify_body_clears_session() {
    let api = api_with(stored(Role::Admin));
    api.client()
        .mock_response(HttpMethod::Get, VERIFY_URL, 200, json!({"valid": true}));

    let outcome = AuthGateway::new(&api).admit(View::Dashboard).await;
    assert_eq!(outcome, Admission::Redirect(View::Login));
    assert!(api.session().get().is_none());
}

#[tokio::test]
async fn test_unreachable_server_clears_session() {
    let api = api_with(stored(Role::Worker));
    api.client().go_offline();

    let outcome = AuthGateway::new(&api).admit(View::Dashboard).await;
    assert_eq!(outcome, Admission::Redirect(View::Login));
    assert!(api.session().get().is_none());
    assert_eq!(api.client().request_count(), 1);

    // The login page now sees no token, so a second gate pass stays local.
    let again = AuthGateway::new(&api).admit(View::Dashboard).await;
    assert_eq!(again, Admission::Redirect(View::Login));
    assert_eq!(api.client().request_count(), 1);
}

#[tokio::test]
async fn test_role_mismatch_goes_to_landing_not_login() {
    let api = api_with(stored(Role::Worker));
    verify_ok(&api, "worker");

    let outcome = AuthGateway::new(&api).admit(View::AdminManage).await;
    assert_eq!(outcome, Admission::Redirect(View::Dashboard));
    assert!(api.session().get().is_some());
}

#[tokio::test]
async fn test_role_is_taken_from_verification() {
    // Stored identity says admin, the server now says user.
    let api = api_with(stored(Role::Admin));
    verify_ok(&api, "user");

    let outcome = AuthGateway::new(&api).admit(View::Reports).await;
    assert_eq!(outcome, Admission::Redirect(View::AlertForm));
    assert_eq!(api.session().get().unwrap().role(), Some(Role::User));
}
