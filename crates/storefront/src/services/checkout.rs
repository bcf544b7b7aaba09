//! Checkout: turning the cart into an order.

use serde::Deserialize;
use tracing::{info, instrument};

use rowing_shop_core::validation::{validate_payment_info, validate_shipping_info};
use rowing_shop_core::{PaymentInfo, ShippingInfo};

use crate::cart::Cart;
use crate::error::{ApiError, Result};
use crate::models::{NewOrder, PlaceOrderResponse};
use crate::state::AppState;

/// Details collected by the checkout form.
///
/// Deserialises from the same field names the order body uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(rename = "shippingDetails")]
    pub shipping: ShippingInfo,
    #[serde(rename = "paymentDetails")]
    pub payment: PaymentInfo,
}

/// Place an order for everything in the cart.
///
/// Checks, in order, that a user is signed in, the cart has something in
/// it, and the shipping then payment details are valid. The cart is emptied
/// only once the server has accepted the order.
///
/// # Errors
///
/// - `ApiError::NotSignedIn`, `ApiError::EmptyCart` or `ApiError::Validation`
///   before any request is sent
/// - whatever [`crate::api::ApiClient::place_order`] returns
#[instrument(skip_all)]
pub async fn place_order(state: &AppState, form: &CheckoutForm) -> Result<PlaceOrderResponse> {
    let user = state
        .session()
        .current_user()
        .ok_or(ApiError::NotSignedIn)?;

    let cart = state.cart();
    if cart.is_empty() {
        return Err(ApiError::EmptyCart);
    }

    validate_shipping_info(&form.shipping)
        .into_result()
        .map_err(ApiError::Validation)?;
    validate_payment_info(&form.payment)
        .into_result()
        .map_err(ApiError::Validation)?;

    let order = NewOrder {
        user_id: user.id,
        items: cart.order_items(),
        shipping_details: form.shipping.clone(),
        payment_details: form.payment.clone(),
    };
    let placed = state.client().place_order(&order).await?;

    state.with_cart(Cart::clear);
    info!(user_id = %user.id, "cart checked out");
    Ok(placed)
}
