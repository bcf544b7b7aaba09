//! Rowing Shop Core - Shared types and form validation.
//!
//! This crate provides the pieces of the Rowing Shop client that involve no
//! I/O at all:
//! - `storefront` - API client, session and cart stores built on these types
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no global state. Every validator can run on each keystroke.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and checkout payloads
//! - [`validation`] - Field-level checks for the account, checkout and contact forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{Field, FieldErrors};
