mod common;

use api_client::{ApiError, AuthState, RequestDescriptor, SessionEvent};
use client_storage::SessionStore;
use common::{bearer, restaurant_json, Harness};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn bearer_is_read_from_store_at_send_time() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::cart_json()))
        .expect(2)
        .mount(&h.server)
        .await;

    h.client.customer().cart().await.unwrap();
    h.store.set_access_token("A9").unwrap();
    h.client.customer().cart().await.unwrap();

    assert_eq!(
        h.authorization_headers("/api/cart").await,
        vec![Some(bearer("A1")), Some(bearer("A9"))]
    );
}

#[tokio::test]
async fn no_bearer_without_stored_token() {
    let h = Harness::new().await;

    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    h.client.customer().restaurants(None).await.unwrap();
    assert_eq!(h.authorization_headers("/api/restaurants").await, vec![None]);
}

#[tokio::test]
async fn expired_access_token_is_renewed_and_request_replayed() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .and(query_param("pin_code", "560001"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([restaurant_json(1, "Dosa Corner")])),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let restaurants = h.client.customer().restaurants(Some("560001")).await.unwrap();

    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].name, "Dosa Corner");
    assert_eq!(h.access_token().as_deref(), Some("A2"));
    assert_eq!(h.refresh_token().as_deref(), Some("R1"));
    assert_eq!(h.events(), vec![SessionEvent::Renewed]);
    assert_eq!(h.client.auth_state(), AuthState::LoggedIn);
    assert!(h.authorization_headers("/api/auth/token/refresh").await.iter().all(Option::is_none));
}

#[tokio::test]
async fn rotated_refresh_token_is_stored() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "A2", "refresh": "R2"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::cart_json()))
        .mount(&h.server)
        .await;

    h.client.customer().cart().await.unwrap();

    assert_eq!(h.access_token().as_deref(), Some("A2"));
    assert_eq!(h.refresh_token().as_deref(), Some("R2"));
}

#[tokio::test]
async fn renewal_drops_cached_user() {
    let h = Harness::logged_in("A1", "R1").await;
    h.store.set_user(&common::user_json(7, "Customer").to_string()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::cart_json()))
        .mount(&h.server)
        .await;

    h.client.customer().cart().await.unwrap();
    assert_eq!(h.cached_user(), None);
}

#[tokio::test]
async fn failed_renewal_clears_session_and_emits_expired() {
    let h = Harness::logged_in("A1", "R1").await;
    h.store.set_user(&common::user_json(7, "Customer").to_string()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/orders/history"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid or expired"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.client.customer().order_history().await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired), "got {err:?}");
    assert_eq!(h.access_token(), None);
    assert_eq!(h.refresh_token(), None);
    assert_eq!(h.cached_user(), None);
    assert_eq!(h.events(), vec![SessionEvent::SessionExpired]);
    assert_eq!(h.client.auth_state(), AuthState::NotLoggedIn);
}

#[tokio::test]
async fn missing_refresh_token_fails_without_calling_refresh() {
    let h = Harness::new().await;
    h.store.set_access_token("A1").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h.client.customer().cart().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(h.access_token(), None);
    assert_eq!(h.events(), vec![SessionEvent::SessionExpired]);
}

#[tokio::test]
async fn second_401_after_replay_is_returned_to_caller() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authorized"})))
        .expect(2)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let url = h.client.api_url("cart").unwrap();
    let response = h.client.send(RequestDescriptor::get(url)).await.unwrap();

    assert_eq!(response.status.as_u16(), 401);
    assert_eq!(h.access_token().as_deref(), Some("A2"));
    assert_eq!(
        h.authorization_headers("/api/cart").await,
        vec![Some(bearer("A1")), Some(bearer("A2"))]
    );
}

#[tokio::test]
async fn typed_helper_maps_final_401_to_status_error() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authorized"})))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.client.customer().cart().await.unwrap_err();
    match err {
        ApiError::Status { status, detail, .. } => {
            assert_eq!(status, 401);
            assert_eq!(detail.as_deref(), Some("Not authorized"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_401_errors_pass_through_without_renewal() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/api/checkout"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Cart is empty"})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h
        .client
        .customer()
        .checkout(api_types::PaymentMode::Cash, None)
        .await
        .unwrap_err();

    assert_eq!(err.user_message("Checkout failed"), "Cart is empty");
    assert_eq!(h.access_token().as_deref(), Some("A1"));
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn unauthenticated_requests_never_carry_bearer_or_renew() {
    let h = Harness::logged_in("A1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "No active account found with the given credentials"}),
        ))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h.session.login("asha@example.com", "wrong-password").await.unwrap_err();

    assert_eq!(
        err.user_message("Login failed"),
        "No active account found with the given credentials"
    );
    assert_eq!(h.authorization_headers("/api/auth/login").await, vec![None]);
    assert_eq!(h.access_token().as_deref(), Some("A1"));
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn slow_response_times_out() {
    let h = Harness::logged_in_with_timeout("A1", "R1", Duration::from_millis(200)).await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::cart_json())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&h.server)
        .await;

    let err = h.client.customer().cart().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout), "got {err:?}");
    assert!(err.is_transient());
    assert_eq!(h.access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn renewal_timeout_is_a_hard_logout() {
    let h = Harness::logged_in_with_timeout("A1", "R1", Duration::from_millis(200)).await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "A2"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&h.server)
        .await;

    let err = h.client.customer().cart().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired), "got {err:?}");
    assert_eq!(h.access_token(), None);
    assert_eq!(h.events(), vec![SessionEvent::SessionExpired]);
}
