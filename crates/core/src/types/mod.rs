//! Core types for the Rowing Shop client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod checkout;
pub mod email;
pub mod id;
pub mod price;

pub use checkout::{PaymentInfo, ShippingInfo};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
