//! Integration tests for checkout, pre-flight validation and admin guards.
//!
//! Run with: cargo test -p rowing-shop-integration-tests --test checkout

use rowing_shop_core::{Email, Field, PaymentInfo, ShippingInfo};
use rowing_shop_integration_tests::{TestShop, api_path, product_json, profile};
use rowing_shop_storefront::ApiError;
use rowing_shop_storefront::services::account;
use rowing_shop_storefront::services::checkout::{CheckoutForm, place_order};
use secrecy::SecretString;
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn valid_form() -> CheckoutForm {
    CheckoutForm {
        shipping: ShippingInfo {
            first_name: "Ada".to_string(),
            last_name: "O'Neil-Row".to_string(),
            email: "ada@club.ca".to_string(),
            address: "1 Regatta Way".to_string(),
            city: "Ottawa".to_string(),
            province: "Ontario".to_string(),
            zip_code: "K1A 0B1".to_string(),
            unit: None,
            ..ShippingInfo::default()
        },
        payment: PaymentInfo {
            card_number: "4111 1111 1111 1111".to_string(),
            expiry_date: "12/99".to_string(),
            cvv: "123".to_string(),
        },
    }
}

/// Load a product through the client and put `quantity` of it in the cart.
async fn fill_cart(shop: &TestShop, product: &Value, quantity: u32) {
    let id: Uuid = product["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("product id"));

    Mock::given(method("GET"))
        .and(path(api_path(&format!("/products/{id}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(product))
        .mount(&shop.server)
        .await;

    let product = shop
        .client()
        .get_product(id.into())
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    shop.state.with_cart(|cart| {
        cart.add(&product);
        cart.set_quantity(product.id, quantity);
    });
}

// ============================================================================
// Order placement
// ============================================================================

#[tokio::test]
async fn test_successful_order_clears_cart() {
    let shop = TestShop::start().await;
    let user = profile("stroke@club.ca", false);
    shop.sign_in("access-1", "refresh-1", &user);

    let product = product_json(Uuid::new_v4(), "Sculling Oars", 349.99, 4);
    fill_cart(&shop, &product, 2).await;
    assert_eq!(shop.state.cart().item_count(), 2);

    Mock::given(method("POST"))
        .and(path(api_path("/orders/place-order")))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Order created successfully",
        })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let confirmation = place_order(&shop.state, &valid_form())
        .await
        .unwrap_or_else(|e| panic!("{e}"));

    assert!(confirmation.success);
    assert_eq!(confirmation.message, "Order created successfully");
    assert!(shop.state.cart().is_empty());

    // The body uses the field names the API expects.
    let requests = shop.server.received_requests().await.unwrap_or_default();
    let placed = requests
        .iter()
        .find(|r| r.url.path() == api_path("/orders/place-order"))
        .unwrap_or_else(|| panic!("order request not sent"));
    let body: Value = serde_json::from_slice(&placed.body).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(body["user_id"], user.id.to_string());
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["items"][0]["product_id"], product["id"]);
    assert_eq!(body["shippingDetails"]["firstName"], "Ada");
    assert_eq!(body["shippingDetails"]["country"], "CAN");
    assert_eq!(body["paymentDetails"]["cvv"], "123");
}

#[tokio::test]
async fn test_rejected_order_keeps_cart() {
    let shop = TestShop::start().await;
    let user = profile("stroke@club.ca", false);
    shop.sign_in("access-1", "refresh-1", &user);

    let product = product_json(Uuid::new_v4(), "Rigger Wrench", 10.0, 1);
    fill_cart(&shop, &product, 1).await;

    Mock::given(method("POST"))
        .and(path(api_path("/orders/place-order")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": [{"loc": ["body", "items"], "msg": "Insufficient stock for Rigger Wrench"}]
        })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let result = place_order(&shop.state, &valid_form()).await;

    assert_eq!(
        result.err().map(|e| e.user_message()).as_deref(),
        Some("Insufficient stock for Rigger Wrench")
    );
    assert_eq!(shop.state.cart().item_count(), 1);
}

#[tokio::test]
async fn test_order_refused_in_success_body_keeps_cart() {
    let shop = TestShop::start().await;
    let user = profile("stroke@club.ca", false);
    shop.sign_in("access-1", "refresh-1", &user);

    let product = product_json(Uuid::new_v4(), "Coxbox", 420.0, 2);
    fill_cart(&shop, &product, 2).await;

    Mock::given(method("POST"))
        .and(path(api_path("/orders/place-order")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Failed to create order: insufficient stock",
        })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let result = place_order(&shop.state, &valid_form()).await;

    match result {
        Err(err @ ApiError::Remote { .. }) => {
            assert_eq!(err.user_message(), "Failed to create order: insufficient stock");
        }
        other => panic!("expected refused order, got {other:?}"),
    }
    assert_eq!(shop.state.cart().item_count(), 2);
}

#[tokio::test]
async fn test_invalid_payment_sends_nothing() {
    let shop = TestShop::start().await;
    let user = profile("stroke@club.ca", false);
    shop.sign_in("access-1", "refresh-1", &user);

    let product = product_json(Uuid::new_v4(), "Seat Pad", 20.0, 5);
    fill_cart(&shop, &product, 1).await;

    Mock::given(method("POST"))
        .and(path(api_path("/orders/place-order")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&shop.server)
        .await;

    let mut form = valid_form();
    form.payment.expiry_date = "01/20".to_string();
    form.payment.cvv = "12".to_string();

    let result = place_order(&shop.state, &form).await;

    let Err(ApiError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(errors.get(Field::ExpiryDate).is_some());
    assert_eq!(errors.get(Field::Cvv), Some("CVV must be exactly 3 digits"));
    assert_eq!(shop.state.cart().item_count(), 1);
}

// ============================================================================
// Admin guards
// ============================================================================

#[tokio::test]
async fn test_admin_calls_refused_for_customers() {
    let shop = TestShop::start().await;
    let user = profile("stroke@club.ca", false);
    shop.sign_in("access-1", "refresh-1", &user);

    Mock::given(method("GET"))
        .and(path(api_path("/users/all-users")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&shop.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/contact/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&shop.server)
        .await;

    assert!(matches!(
        shop.client().list_users().await,
        Err(ApiError::AdminRequired)
    ));
    assert!(matches!(
        shop.client().list_contacts().await,
        Err(ApiError::AdminRequired)
    ));
    assert!(matches!(
        shop.client().delete_user(user.id).await,
        Err(ApiError::AdminRequired)
    ));
    let email = Email::parse("novice@club.ca").unwrap_or_else(|e| panic!("{e}"));
    assert!(matches!(
        shop.client()
            .create_user(&email, &SecretString::from("Sculling2024!"))
            .await,
        Err(ApiError::AdminRequired)
    ));
}

#[tokio::test]
async fn test_admin_lists_users_and_contacts() {
    let shop = TestShop::start().await;
    let admin = profile("coach@club.ca", true);
    shop.sign_in("access-1", "refresh-1", &admin);

    Mock::given(method("GET"))
        .and(path(api_path("/users/all-users")))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": admin.id.to_string(), "email": "coach@club.ca", "is_admin": true, "is_active": true},
            {"id": Uuid::new_v4().to_string(), "email": "novice@club.ca", "is_admin": false, "is_active": false},
        ])))
        .expect(1)
        .mount(&shop.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/contact/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": Uuid::new_v4().to_string(),
            "email": "parent@club.ca",
            "message": "Do you sell junior blades?",
            "created_at": "2024-05-01T09:30:00",
        }])))
        .expect(1)
        .mount(&shop.server)
        .await;

    let users = shop
        .client()
        .list_users()
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|u| !u.is_active));

    let contacts = shop
        .client()
        .list_contacts()
        .await
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        contacts.first().map(|c| c.message.as_str()),
        Some("Do you sell junior blades?")
    );
}

#[tokio::test]
async fn test_admin_creates_user_without_switching_session() {
    let shop = TestShop::start().await;
    let admin = profile("coach@club.ca", true);
    shop.sign_in("access-1", "refresh-1", &admin);
    let new_id = Uuid::new_v4();

    // Even a response carrying tokens must not replace the admin's session.
    Mock::given(method("POST"))
        .and(path(api_path("/auth/register")))
        .and(header("authorization", "Bearer access-1"))
        .and(body_json(json!({"email": "novice@club.ca", "password": "Sculling2024!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": new_id.to_string(),
            "email": "novice@club.ca",
            "is_admin": false,
            "is_active": true,
            "access_token": "novice-access",
            "refresh_token": "novice-refresh",
        })))
        .expect(1)
        .mount(&shop.server)
        .await;

    let created = account::create_user(
        &shop.state,
        "novice@club.ca",
        &SecretString::from("Sculling2024!"),
    )
    .await
    .unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(created.id.to_string(), new_id.to_string());
    assert_eq!(created.email.as_str(), "novice@club.ca");
    assert_eq!(shop.access_token().as_deref(), Some("access-1"));
    assert_eq!(shop.refresh_token().as_deref(), Some("refresh-1"));
    assert_eq!(shop.session().current_user(), Some(admin));
}

#[tokio::test]
async fn test_create_user_with_weak_password_sends_nothing() {
    let shop = TestShop::start().await;
    let admin = profile("coach@club.ca", true);
    shop.sign_in("access-1", "refresh-1", &admin);

    Mock::given(method("POST"))
        .and(path(api_path("/auth/register")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&shop.server)
        .await;

    let result =
        account::create_user(&shop.state, "novice@club.ca", &SecretString::from("short")).await;

    let Err(ApiError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(errors.get(Field::Password).is_some());
}

#[tokio::test]
async fn test_contact_form_is_public() {
    let shop = TestShop::start().await;

    Mock::given(method("POST"))
        .and(path(api_path("/contact/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": Uuid::new_v4().to_string(),
            "email": "parent@club.ca",
            "message": "Hello",
            "created_at": "2024-05-01T09:30:00",
        })))
        .expect(1)
        .mount(&shop.server)
        .await;

    account::submit_contact(&shop.state, "parent@club.ca", "Hello")
        .await
        .unwrap_or_else(|e| panic!("{e}"));
}
