//! Front-end flows built on the API client.
//!
//! # Services
//!
//! - `account` - Registration, password change, order history, contact form
//! - `checkout` - Turning the cart into an order
//!
//! Every flow validates its input before anything goes over the network and
//! leaves session and cart untouched when it fails.

pub mod account;
pub mod checkout;
