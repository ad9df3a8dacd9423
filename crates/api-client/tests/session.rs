mod common;

use api_client::{ApiClient, ApiError, AuthState, SessionEvent, SessionManager};
use api_types::{Role, SignupRequest};
use client_storage::{open_session_store, SessionStore};
use common::{bearer, user_json, Harness};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_stores_tokens_and_user() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "asha@example.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "A1",
            "refresh": "R1",
            "user": user_json(7, "Customer")
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let user = h.session.login("asha@example.com", "hunter22").await.unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.role, Role::Customer);
    assert_eq!(h.access_token().as_deref(), Some("A1"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));
    assert!(h.cached_user().is_some());
    assert_eq!(h.session.auth_state(), AuthState::LoggedIn);
    assert!(h.session.is_logged_in().unwrap());
    assert_eq!(
        h.events(),
        vec![SessionEvent::LoggedIn { user: Some(user) }]
    );
}

#[tokio::test]
async fn login_without_user_fetches_profile() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "A1", "refresh": "R1"})),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "Delivery Partner")))
        .expect(1)
        .mount(&h.server)
        .await;

    let user = h.session.login("asha@example.com", "hunter22").await.unwrap();
    assert_eq!(user.role, Role::DeliveryPartner);

    // Cached after the first fetch.
    let again = h.session.current_user().await.unwrap();
    assert_eq!(again, user);
}

#[tokio::test]
async fn failed_login_from_logged_out_state() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]
        })))
        .mount(&h.server)
        .await;

    let err = h.session.login("nope", "x").await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Login failed"), "value is not a valid email address");
    assert_eq!(h.session.auth_state(), AuthState::NotLoggedIn);
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn current_user_requires_a_session() {
    let h = Harness::new().await;
    let err = h.session.current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::NotLoggedIn));
}

#[tokio::test]
async fn current_user_is_fetched_lazily_and_cached() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/auth/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(9, "Admin")))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(h.cached_user(), None);
    let first = h.session.current_user().await.unwrap();
    let second = h.session.current_user().await.unwrap();

    assert_eq!(first.role, Role::Admin);
    assert_eq!(first, second);
    assert!(h.cached_user().is_some());
}

#[tokio::test]
async fn logout_clears_everything() {
    let h = Harness::logged_in("A1", "R1").await;
    h.store.set_user(&user_json(7, "Customer").to_string()).unwrap();

    h.session.logout().unwrap();

    assert_eq!(h.access_token(), None);
    assert_eq!(h.refresh_token(), None);
    assert_eq!(h.cached_user(), None);
    assert_eq!(h.session.auth_state(), AuthState::NotLoggedIn);
    assert_eq!(h.events(), vec![SessionEvent::LoggedOut]);
}

#[tokio::test]
async fn require_role_checks_cached_user() {
    let h = Harness::logged_in("A1", "R1").await;
    h.store.set_user(&user_json(7, "Customer").to_string()).unwrap();

    let user = h.session.require_role(&[Role::Customer]).await.unwrap();
    assert_eq!(user.id, 7);

    let err = h.session.require_role(&[Role::Admin]).await.unwrap_err();
    match err {
        ApiError::Forbidden { required, actual } => {
            assert_eq!(required, vec![Role::Admin]);
            assert_eq!(actual, Role::Customer);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn require_role_without_session() {
    let h = Harness::new().await;
    let err = h.session.require_role(&[Role::Customer]).await.unwrap_err();
    assert!(matches!(err, ApiError::NotLoggedIn));
}

fn signup_request() -> SignupRequest {
    SignupRequest {
        name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        password: "hunter22".into(),
        password_confirm: "hunter22".into(),
        role: Role::Customer,
        pin_code: "560001".into(),
    }
}

#[tokio::test]
async fn signup_with_tokens_establishes_session() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "password": "hunter22",
            "password_confirm": "hunter22",
            "role": "Customer",
            "pin_code": "560001"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "User created successfully",
            "user": user_json(11, "Customer"),
            "access": "A1",
            "refresh": "R1"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let response = h.session.signup(&signup_request()).await.unwrap();

    assert_eq!(response.user.id, 11);
    assert_eq!(h.access_token().as_deref(), Some("A1"));
    assert_eq!(h.session.auth_state(), AuthState::LoggedIn);
    assert!(matches!(h.events().as_slice(), [SessionEvent::LoggedIn { .. }]));
}

#[tokio::test]
async fn signup_without_tokens_leaves_session_alone() {
    let h = Harness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "User created successfully",
            "user": user_json(11, "Customer Care")
        })))
        .mount(&h.server)
        .await;

    let response = h.session.signup(&signup_request()).await.unwrap();

    assert_eq!(response.user.role, Role::CustomerCare);
    assert_eq!(h.access_token(), None);
    assert_eq!(h.session.auth_state(), AuthState::NotLoggedIn);
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn session_survives_restart_with_file_store() {
    let temp = TempDir::new().unwrap();
    let session_file = temp.path().join("sessions").join("localhost.json");
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "A1",
            "refresh": "R1",
            "user": user_json(7, "Customer")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", bearer("A1").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::cart_json()))
        .expect(1)
        .mount(&server)
        .await;

    {
        let store: Arc<dyn SessionStore> = Arc::new(open_session_store(session_file.clone()).unwrap());
        let client = ApiClient::with_settings(
            common::settings_for(&server, Duration::from_secs(5)),
            store,
        )
        .unwrap();
        SessionManager::new(client)
            .login("asha@example.com", "hunter22")
            .await
            .unwrap();
    }

    let store: Arc<dyn SessionStore> = Arc::new(open_session_store(session_file.clone()).unwrap());
    let client =
        ApiClient::with_settings(common::settings_for(&server, Duration::from_secs(5)), store)
            .unwrap();

    assert_eq!(client.auth_state(), AuthState::LoggedIn);
    let user = SessionManager::new(client.clone()).current_user().await.unwrap();
    assert_eq!(user.id, 7);
    client.customer().cart().await.unwrap();
}

#[tokio::test]
async fn renewal_is_visible_to_another_client_on_the_same_file() {
    let temp = TempDir::new().unwrap();
    let session_file = temp.path().join("sessions").join("localhost.json");
    let server = MockServer::start().await;

    let open_client = || {
        let store: Arc<dyn SessionStore> =
            Arc::new(open_session_store(session_file.clone()).unwrap());
        ApiClient::with_settings(common::settings_for(&server, Duration::from_secs(5)), store)
            .unwrap()
    };

    let first = open_client();
    first.store().set_credentials("A1", "R1").unwrap();
    let second = open_client();

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "A2", "refresh": "R2"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::cart_json()))
        .expect(2)
        .mount(&server)
        .await;

    first.customer().cart().await.unwrap();

    // The second client caches user JSON after the first one renewed.
    second
        .store()
        .set_user(&user_json(7, "Customer").to_string())
        .unwrap();
    second.customer().cart().await.unwrap();

    let reopened = open_session_store(session_file.clone()).unwrap();
    assert_eq!(reopened.access_token().unwrap().as_deref(), Some("A2"));
    assert_eq!(reopened.refresh_token().unwrap().as_deref(), Some("R2"));
}
