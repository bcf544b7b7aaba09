//! Resource types exchanged with the REST API.

pub mod contact;
pub mod order;
pub mod product;
pub mod user;

pub use contact::{ContactMessage, ContactSubmission};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, PlaceOrderResponse, ShippingAddress};
pub use product::Product;
pub use user::{UserAccount, UserProfile};
