//! Order types.

use serde::{Deserialize, Serialize};

use rowing_shop_core::{OrderId, OrderItemId, PaymentInfo, Price, ProductId, ShippingInfo, UserId};

use super::Product;

/// One line of an order being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /orders/place-order`.
///
/// The server prices the order; the client sends only quantities.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<NewOrderItem>,
    #[serde(rename = "shippingDetails")]
    pub shipping_details: ShippingInfo,
    #[serde(rename = "paymentDetails")]
    pub payment_details: PaymentInfo,
}

/// Body the server answers `POST /orders/place-order` with.
///
/// A refused order can still arrive with a 2xx status and `success: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// A placed order, as returned by the order endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_price: Price,
    pub items: Vec<OrderItem>,
    pub shipping_info: ShippingAddress,
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: Product,
    /// Unit price charged, when the server recorded one.
    #[serde(default)]
    pub price: Option<Price>,
}

/// Shipping address stored with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub country: String,
}
