//! Rowing Shop storefront client library.
//!
//! Everything a front end needs to talk to the Rowing Shop API:
//!
//! - [`session`] - the signed-in user's tokens and profile
//! - [`cart`] - the in-memory shopping cart
//! - [`api`] - the HTTP client, with one refresh-and-retry on a 401
//! - [`services`] - checkout and account flows that validate before sending
//! - [`state`] - the cloneable handle tying client and cart together
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use rowing_shop_storefront::{AppState, ClientConfig};
//!
//! let state = AppState::with_memory_session(ClientConfig::from_env()?)?;
//! let products = state.client().list_products().await?;
//! if let Some(product) = products.iter().find(|p| p.in_stock()) {
//!     state.with_cart(|cart| cart.add(product));
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

pub use api::{ApiClient, PendingRequest, Registration};
pub use cart::{Cart, CartLine};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result};
pub use session::{MemorySessionStore, Session, SessionStore};
pub use state::AppState;
