//! Product catalog endpoints. Public; no session needed.

use tracing::instrument;

use rowing_shop_core::ProductId;

use super::{ApiClient, PendingRequest, paths};
use crate::error::Result;
use crate::models::Product;

impl ApiClient {
    /// List every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` or `ApiError::Network` if the catalog can
    /// not be loaded.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.call(&PendingRequest::get(paths::PRODUCTS)).await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` with status 404 for an unknown product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.call(&PendingRequest::get(paths::product(id))).await
    }
}
