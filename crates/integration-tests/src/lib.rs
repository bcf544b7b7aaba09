//! Integration tests for the Rowing Shop client.
//!
//! Every test runs the real client against a [`wiremock`] server standing in
//! for the REST API, so no backend is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rowing-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_retry` - The 401 refresh-and-retry cycle
//! - `session_lifecycle` - Login, registration, logout, restore
//! - `checkout` - Order placement, validation and admin guards

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::time::Duration;

use rowing_shop_core::Email;
use rowing_shop_storefront::models::UserProfile;
use rowing_shop_storefront::{ApiClient, AppState, ClientConfig, MemorySessionStore, SessionStore};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;
use wiremock::MockServer;

/// Path prefix the mock API is mounted under.
pub const API_PREFIX: &str = "/api";

/// Request timeout used by test clients; mocks delayed past it look like
/// network failures.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

/// A mock API server and application state pointed at it.
pub struct TestShop {
    pub server: MockServer,
    pub state: AppState,
}

impl TestShop {
    /// Start a mock server and a signed-out client.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URL does not parse or the client can not be built.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base = Url::parse(&format!("{}{API_PREFIX}", server.uri())).expect("mock server URL");
        let mut config = ClientConfig::new(base);
        config.request_timeout = Some(TEST_TIMEOUT);

        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let state = AppState::new(config, session).expect("client builds");
        Self { server, state }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        self.state.client()
    }

    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.state.session()
    }

    /// Put a signed-in user straight into the session store.
    pub fn sign_in(&self, access_token: &str, refresh_token: &str, user: &UserProfile) {
        self.session()
            .login(access_token.into(), refresh_token.into(), user.clone());
    }

    /// The stored access token, exposed for assertions.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.session().access_token().map(|t| expose(&t))
    }

    /// The stored refresh token, exposed for assertions.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.session().refresh_token().map(|t| expose(&t))
    }
}

/// Full mock-server path for an API path such as `/users/me`.
#[must_use]
pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// A profile with a fresh ID.
///
/// # Panics
///
/// Panics if `email` is malformed.
#[must_use]
pub fn profile(email: &str, is_admin: bool) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4().into(),
        email: Email::parse(email).expect("test email is valid"),
        is_admin,
    }
}

/// The JSON `GET /users/me` returns for `user`.
#[must_use]
pub fn profile_json(user: &UserProfile) -> Value {
    json!({
        "id": user.id.to_string(),
        "email": user.email.as_str(),
        "is_admin": user.is_admin,
        "is_active": true,
    })
}

/// A catalog product as the API returns it.
#[must_use]
pub fn product_json(id: Uuid, name: &str, price: f64, stock: u32) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "description": "Made for the boathouse",
        "price": price,
        "stock": stock,
        "image_url": null,
    })
}

#[must_use]
pub fn expose(secret: &SecretString) -> String {
    secret.expose_secret().to_owned()
}
