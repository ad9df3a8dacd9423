#![allow(dead_code)]

use api_client::{ApiClient, ClientSettings, SessionEvent, SessionManager};
use client_storage::{PersistentSessionStore, SessionStore};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::MockServer;

/// A client wired to a mock backend with an in-memory session store.
pub struct Harness {
    pub server: MockServer,
    pub client: ApiClient,
    pub session: SessionManager,
    pub store: Arc<PersistentSessionStore>,
    pub events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl Harness {
    /// Harness with no stored credentials.
    pub async fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5)).await
    }

    /// Harness whose store already holds `access`/`refresh`.
    pub async fn logged_in(access: &str, refresh: &str) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(PersistentSessionStore::in_memory());
        store
            .set_credentials(access, refresh)
            .expect("failed to seed credentials");
        Self::build(server, store, Duration::from_secs(5))
    }

    pub async fn with_timeout(timeout: Duration) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(PersistentSessionStore::in_memory());
        Self::build(server, store, timeout)
    }

    pub async fn logged_in_with_timeout(access: &str, refresh: &str, timeout: Duration) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(PersistentSessionStore::in_memory());
        store
            .set_credentials(access, refresh)
            .expect("failed to seed credentials");
        Self::build(server, store, timeout)
    }

    fn build(server: MockServer, store: Arc<PersistentSessionStore>, timeout: Duration) -> Self {
        let client = ApiClient::with_settings(
            settings_for(&server, timeout),
            store.clone() as Arc<dyn SessionStore>,
        )
        .expect("failed to build client");

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        client.on_session_event(move |event| sink.lock().push(event));

        Self {
            session: SessionManager::new(client.clone()),
            server,
            client,
            store,
            events,
        }
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.access_token().expect("store read failed")
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.refresh_token().expect("store read failed")
    }

    pub fn cached_user(&self) -> Option<String> {
        self.store.user().expect("store read failed")
    }

    /// `Authorization` headers of every request the server saw, in order.
    pub async fn authorization_headers(&self, request_path: &str) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .map(|r| {
                r.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }
}

/// Settings mirroring the default layout under the mock server's origin.
pub fn settings_for(server: &MockServer, timeout: Duration) -> ClientSettings {
    let origin = server.uri();
    ClientSettings {
        api_base_url: Url::parse(&format!("{origin}/api")).expect("bad api url"),
        auth_base_url: Url::parse(&format!("{origin}/api/auth")).expect("bad auth url"),
        admin_base_url: Url::parse(&format!("{origin}/api/admin")).expect("bad admin url"),
        request_timeout: timeout,
        connect_timeout: Duration::from_secs(2),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn user_json(id: i64, role: &str) -> Value {
    json!({
        "id": id,
        "name": "Asha Rao",
        "email": "asha@example.com",
        "role": role,
        "pin_code": "560001",
        "created_at": "2024-01-01T10:00:00Z"
    })
}

pub fn restaurant_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "pin_code": "560001",
        "owner_id": 3,
        "status": "active",
        "is_ordering_enabled": true,
        "created_at": "2024-01-01T10:00:00"
    })
}

pub fn cart_json() -> Value {
    json!({
        "restaurant_id": 1,
        "restaurant_name": "Dosa Corner",
        "items": [
            {"dish_id": 1, "dish_name": "Masala Dosa", "price": "75.00", "quantity": 2, "subtotal": "150.00"},
            {"dish_id": 2, "dish_name": "Thali", "price": "200.00", "quantity": 1, "subtotal": "200.00"}
        ],
        "subtotal": "350.00",
        "item_count": 3
    })
}

pub fn order_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "customer_id": 7,
        "restaurant_id": 1,
        "delivery_partner_id": null,
        "status": status,
        "total_amount": "385.00",
        "discount_amount": "0.00",
        "delivery_fee": "30.00",
        "platform_fee": "5.00",
        "payment_mode": "upi",
        "created_at": "2024-01-01T10:00:00",
        "updated_at": "2024-01-01T10:00:00",
        "items": [{"id": 1, "dish_id": 1, "quantity": 2, "price_snapshot": "75.00"}]
    })
}
