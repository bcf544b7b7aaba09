//! Catalog types.

use serde::{Deserialize, Serialize};

use rowing_shop_core::{Price, ProductId};

/// A product listed by `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    /// Units available right now.
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Returns `true` if at least one unit can be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_float_price() {
        let product: Product = serde_json::from_str(
            r#"{"id":"0b8f7a2e-1d6c-4e43-8f5a-3c2b1a0d9e8f","name":"Carbon Oar",
                "description":null,"price":349.99,"stock":0}"#,
        )
        .unwrap();
        assert_eq!(product.price, Price::from_cents(34999));
        assert!(!product.in_stock());
        assert_eq!(product.image_url, None);
    }
}
