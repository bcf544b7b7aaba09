//! Application state shared across front-end handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::api::ApiClient;
use crate::cart::Cart;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::{MemorySessionStore, SessionStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the API
/// client (and through it the session store) and the shopping cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    client: ApiClient,
    cart: Mutex<Cart>,
}

impl AppState {
    /// Create application state around an existing session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can not be built.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let client = ApiClient::new(config, session)?;
        Ok(Self::from_client(client))
    }

    /// Create application state with a fresh in-memory session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can not be built.
    pub fn with_memory_session(config: ClientConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemorySessionStore::new()))
    }

    /// Wrap an already configured client with an empty cart.
    #[must_use]
    pub fn from_client(client: ApiClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                client,
                cart: Mutex::new(Cart::new()),
            }),
        }
    }

    /// Get a reference to the API client.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.inner.client.session()
    }

    /// A copy of the cart as it is now.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.with_cart(|cart| cart.clone())
    }

    /// Run `f` with exclusive access to the cart.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Sign out and empty the cart.
    pub async fn logout(&self) {
        self.inner.client.logout().await;
        self.with_cart(Cart::clear);
    }
}

#[cfg(test)]
mod tests {
    use rowing_shop_core::{Price, ProductId};

    use super::*;
    use crate::models::Product;

    fn state() -> AppState {
        let url = url::Url::parse(crate::config::DEFAULT_API_URL)
            .unwrap_or_else(|e| panic!("url: {e}"));
        AppState::with_memory_session(ClientConfig::new(url))
            .unwrap_or_else(|e| panic!("state: {e}"))
    }

    #[test]
    fn test_clones_share_cart() {
        let state = state();
        let other = state.clone();
        let product = Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: "Seat Pad".to_string(),
            description: None,
            price: Price::from_cents(2_000),
            stock: 4,
            image_url: None,
        };

        state.with_cart(|cart| cart.add(&product));
        assert_eq!(other.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_logout_without_session_clears_cart_offline() {
        let state = state();
        let product = Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: "Spare Fin".to_string(),
            description: None,
            price: Price::from_cents(1_500),
            stock: 2,
            image_url: None,
        };
        state.with_cart(|cart| cart.add(&product));

        // No access token, so nothing is sent.
        state.logout().await;
        assert!(state.cart().is_empty());
        assert!(state.session().snapshot().is_empty());
    }
}
