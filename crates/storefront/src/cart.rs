//! Shopping cart held in memory for the current browser session.
//!
//! Lines are kept in insertion order and keyed by product. The cart is not
//! persisted server-side; checkout converts it into an order. It is cleared
//! on logout and after an order is placed.
//!
//! The store does not enforce stock limits on quantity changes. Callers check
//! [`CartLine::accepts`] before calling [`Cart::set_quantity`], as the cart
//! page does.

use rowing_shop_core::{Price, ProductId};

use crate::models::{NewOrderItem, Product};

/// One product and quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    /// Always at least 1; a line at 0 is removed instead.
    pub quantity: u32,
    /// Stock reported when the product was added.
    pub available_stock: u32,
}

impl CartLine {
    /// Whether `quantity` is an allowed new quantity for this line
    /// (between 1 and the available stock).
    #[must_use]
    pub const fn accepts(&self, quantity: u32) -> bool {
        quantity >= 1 && quantity <= self.available_stock
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered collection of [`CartLine`]s, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line's quantity, or appends a new line with
    /// quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            available_stock: product.stock,
        });
    }

    /// Set a line's quantity. Zero removes the line; unknown products are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Delete a line if present.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart as order lines for checkout.
    #[must_use]
    pub fn order_items(&self) -> Vec<NewOrderItem> {
        self.lines
            .iter()
            .map(|line| NewOrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: "Sculling Oars".to_string(),
            description: None,
            price: Price::from_cents(price_cents),
            stock,
            image_url: None,
        }
    }

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::new();
        let oars = product(34_999, 5);
        cart.add(&oars);
        cart.add(&oars);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(oars.id).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_add_does_not_cap_at_stock() {
        let mut cart = Cart::new();
        let last_one = product(1_000, 1);
        cart.add(&last_one);
        cart.add(&last_one);

        let line = cart.line(last_one.id).cloned();
        assert_eq!(line.as_ref().map(|l| l.quantity), Some(2));
        assert_eq!(line.map(|l| l.accepts(2)), Some(false));
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut cart = Cart::new();
        cart.add(&product(500, 3));
        let before = cart.clone();

        let seat = product(2_500, 2);
        cart.add(&seat);
        cart.remove(seat.id);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = Cart::new();
        let ten = product(1_000, 5);
        let five = product(500, 5);
        cart.add(&ten);
        cart.set_quantity(ten.id, 2);
        cart.add(&five);
        cart.set_quantity(five.id, 3);

        assert_eq!(cart.total(), Price::from_cents(3_500));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let oars = product(34_999, 5);
        cart.add(&oars);
        cart.set_quantity(oars.id, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(100, 1));
        let before = cart.clone();
        cart.set_quantity(ProductId::new(uuid::Uuid::new_v4()), 4);
        cart.remove(ProductId::new(uuid::Uuid::new_v4()));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        let first = product(100, 1);
        let second = product(200, 1);
        cart.add(&first);
        cart.add(&second);
        cart.add(&first);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_accepts_bounds() {
        let mut cart = Cart::new();
        let oars = product(100, 3);
        cart.add(&oars);
        let line = cart.line(oars.id).cloned().unwrap_or_else(|| panic!("line missing"));
        assert!(!line.accepts(0));
        assert!(line.accepts(1));
        assert!(line.accepts(3));
        assert!(!line.accepts(4));
    }

    #[test]
    fn test_clear_and_order_items() {
        let mut cart = Cart::new();
        let oars = product(100, 3);
        cart.add(&oars);
        cart.add(&oars);
        assert_eq!(
            cart.order_items(),
            vec![NewOrderItem {
                product_id: oars.id,
                quantity: 2
            }]
        );
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}
