//! Catalog, ordering and contact commands.

use std::fs;
use std::path::Path;

use rowing_shop_core::ProductId;
use rowing_shop_storefront::Cart;
use rowing_shop_storefront::models::{Order, Product};
use rowing_shop_storefront::services::{account, checkout};

use super::{CliError, Result, Shell};

/// Parse an `--item` argument of the form `PRODUCT_ID:QUANTITY`.
///
/// # Errors
///
/// Returns a message for clap if either half is malformed or the quantity is zero.
pub fn parse_item(value: &str) -> std::result::Result<(ProductId, u32), String> {
    let (id, quantity) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QUANTITY, got `{value}`"))?;
    let id = id
        .parse::<ProductId>()
        .map_err(|e| format!("invalid product ID `{id}`: {e}"))?;
    let quantity = quantity
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity `{quantity}`: {e}"))?;
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    Ok((id, quantity))
}

/// List the catalog, or show one product in detail.
#[allow(clippy::print_stdout)]
pub async fn products(shell: &Shell, id: Option<ProductId>) -> Result<()> {
    let client = shell.state.client();
    if let Some(id) = id {
        let product = client.get_product(id).await?;
        print_product(&product);
        if let Some(description) = &product.description {
            println!("    {description}");
        }
        return Ok(());
    }

    let products = client.list_products().await?;
    if products.is_empty() {
        println!("No products listed");
    }
    for product in &products {
        print_product(product);
    }
    Ok(())
}

/// List the signed-in user's orders.
#[allow(clippy::print_stdout)]
pub async fn orders(shell: &Shell) -> Result<()> {
    let orders = account::my_orders(&shell.state).await?;
    if orders.is_empty() {
        println!("No orders yet");
    }
    for order in &orders {
        print_order(order);
    }
    Ok(())
}

/// Fill the cart from `items` and check out with the details in `details`.
#[allow(clippy::print_stdout)]
pub async fn order(shell: &Shell, items: &[(ProductId, u32)], details: &Path) -> Result<()> {
    let form: checkout::CheckoutForm = serde_json::from_slice(&fs::read(details)?)?;

    for &(id, quantity) in items {
        let product = shell.state.client().get_product(id).await?;
        shell
            .state
            .with_cart(|cart| stage_item(cart, &product, quantity))?;
    }

    let cart = shell.state.cart();
    println!("{} item(s), total {}", cart.item_count(), cart.total());

    let placed = checkout::place_order(&shell.state, &form).await?;
    println!("{}", placed.message);
    Ok(())
}

/// Put `quantity` of `product` in the cart, or leave the cart untouched if
/// the stock can't cover it.
fn stage_item(cart: &mut Cart, product: &Product, quantity: u32) -> Result<()> {
    if quantity == 0 || quantity > product.stock {
        return Err(CliError::Quantity {
            product: product.name.clone(),
            requested: quantity,
            available: product.stock,
        });
    }
    cart.add(product);
    cart.set_quantity(product.id, quantity);
    Ok(())
}

/// Send a contact-form message.
#[allow(clippy::print_stdout)]
pub async fn contact(shell: &Shell, email: &str, message: &str) -> Result<()> {
    account::submit_contact(&shell.state, email, message).await?;
    println!("Thank you for your message. We will get back to you soon!");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_product(product: &Product) {
    let stock = if product.in_stock() {
        format!("{} in stock", product.stock)
    } else {
        "out of stock".to_string()
    };
    println!("{}  {:<32} {:>10}  {stock}", product.id, product.name, product.price.to_string());
}

#[allow(clippy::print_stdout)]
fn print_order(order: &Order) {
    println!("Order {}  total {}", order.id, order.total_price);
    for item in &order.items {
        println!("    {} x {}", item.quantity, item.product.name);
    }
    let ship = &order.shipping_info;
    println!(
        "    ship to {} {}, {}, {}",
        ship.first_name, ship.last_name, ship.city, ship.province
    );
}
