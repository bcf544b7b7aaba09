//! Checkout form payloads.
//!
//! Field names on the wire follow the order endpoint's schema
//! (`firstName`, `zip_code`, `cardNumber`, ...), which mixes conventions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Country code sent when the form does not specify one.
pub const DEFAULT_COUNTRY: &str = "CAN";

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Shipping details collected on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
    /// Apartment or unit number.
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            province: String::new(),
            zip_code: String::new(),
            unit: None,
            country: default_country(),
        }
    }
}

/// Card details collected on the checkout page.
///
/// The client only checks the shape of these fields and forwards them; it
/// never processes payment. `Debug` is implemented manually so card data
/// does not end up in logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(rename = "cardNumber")]
    pub card_number: String,
    /// `MM/YY`.
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &"[REDACTED]")
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}
