//! Order endpoints.

use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use rowing_shop_core::UserId;

use super::{ApiClient, PendingRequest, paths};
use crate::error::{ApiError, Result};
use crate::models::{NewOrder, Order, PlaceOrderResponse};

const ORDER_REFUSED: &str = "Failed to place order";

impl ApiClient {
    /// Place an order for the signed-in user.
    ///
    /// Validation of shipping and payment details is the caller's job; see
    /// [`crate::services::checkout::place_order`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` when the server refuses the order (for
    /// example insufficient stock), including a refusal reported as
    /// `success: false` in a 2xx body.
    #[instrument(skip(self, order), fields(user_id = %order.user_id, lines = order.items.len()))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<PlaceOrderResponse> {
        let request = PendingRequest::post(paths::PLACE_ORDER)
            .authorized()
            .json(order)?;
        let response = accepted(self.call(&request).await?)?;
        info!(message = %response.message, "order placed");
        Ok(response)
    }

    /// List a user's orders, newest last as the server returns them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionExpired` if the session can no longer be
    /// refreshed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>> {
        self.call(&PendingRequest::get(paths::user_orders(user_id)).authorized())
            .await
    }
}

/// Turn a `success: false` body into the same error a non-2xx status gives.
fn accepted(response: PlaceOrderResponse) -> Result<PlaceOrderResponse> {
    if response.success {
        return Ok(response);
    }
    warn!(message = %response.message, "order refused");
    let detail = if response.message.is_empty() {
        ORDER_REFUSED.to_string()
    } else {
        response.message
    };
    Err(ApiError::Remote {
        status: StatusCode::OK,
        detail,
    })
}
