//! End-to-end checkout tests.
//!
//! Drive the whole customer journey against the in-memory store: pick a
//! variant, fill the form, submit, and verify what was written.

use boutik_core::{DeliveryMethod, OrderStatus, Price, VariantId};
use boutik_integration_tests::{FakeStore, fixtures};
use boutik_storefront::cart::CartStore;
use boutik_storefront::catalog::Catalog;
use boutik_storefront::checkout::{
    CheckoutError, CheckoutFlow, CheckoutPhase, FormError, SubmitBanner,
};
use boutik_storefront::product_page::VariantPicker;

/// Fill every required field for a stopdesk order to Algiers.
fn fill_form(flow: &mut CheckoutFlow) {
    let form = flow.form_mut().expect("flow should be editable");
    form.set_first_name("Amine");
    form.set_last_name("Benali");
    form.set_phone("0551234567");
    form.select_wilaya(fixtures::ALGIERS_ID);
    form.set_baladiya("Bab El Oued");
}

#[tokio::test]
async fn test_successful_checkout_records_order_and_clears_cart() {
    let store = FakeStore::stocked();
    let catalog = Catalog::load(&store).await;
    let tee = catalog.product(fixtures::TSHIRT_ID).expect("tee loaded");

    // Two tees at 2000 DA through the picker.
    let mut cart = CartStore::new();
    let mut picker = VariantPicker::new(tee.clone());
    picker.select_size("M");
    picker.select_color("Red");
    picker.increment();
    picker
        .add_to_cart(&mut cart)
        .expect("full selection should reach the cart");
    assert_eq!(cart.total(), Price::dinars(4000));

    let mut flow = CheckoutFlow::start(&store).await;
    fill_form(&mut flow);
    assert_eq!(flow.delivery_price(), Price::dinars(400));
    assert_eq!(flow.final_total(&cart), Price::dinars(4400));

    let order_id = flow
        .submit(&store, &mut cart)
        .await
        .expect("submission should succeed");

    assert_eq!(flow.phase(), CheckoutPhase::Success(order_id));
    assert!(cart.is_empty());
    assert_eq!(flow.banner(), None);

    let placed = store.placed_orders();
    assert_eq!(placed.len(), 1);
    let (order, items) = &placed[0];
    assert_eq!(order.shipping_fee, Price::dinars(400));
    assert_eq!(order.total_amount, Price::dinars(4400));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.delivery_method, DeliveryMethod::Stopdesk);
    assert_eq!(order.custom_baladiya, "Bab El Oued");
    assert_eq!(order.address, None);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].variant_id, VariantId::new(11));
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].price_at_purchase, Price::dinars(2000));
}

#[tokio::test]
async fn test_second_submit_is_rejected() {
    let store = FakeStore::stocked();
    let catalog = Catalog::load(&store).await;
    let tee = catalog.product(fixtures::TSHIRT_ID).expect("tee loaded");

    let mut cart = CartStore::new();
    cart.add(tee, "M", "Red", 1);

    let mut flow = CheckoutFlow::start(&store).await;
    fill_form(&mut flow);

    flow.submit(&store, &mut cart)
        .await
        .expect("first submission should succeed");
    let second = flow.submit(&store, &mut cart).await;

    assert!(matches!(second, Err(CheckoutError::NotEditing)));
    assert_eq!(store.placed_orders().len(), 1);
    // The flow stays on the success screen and the form is locked.
    assert!(matches!(flow.phase(), CheckoutPhase::Success(_)));
    assert!(flow.form_mut().is_none());
}

#[tokio::test]
async fn test_failed_submit_keeps_cart_and_returns_to_editing() {
    let store = FakeStore::stocked().with_order_failure(500, "internal error");
    let catalog = Catalog::load(&store).await;
    let tee = catalog.product(fixtures::TSHIRT_ID).expect("tee loaded");

    let mut cart = CartStore::new();
    cart.add(tee, "M", "Red", 2);

    let mut flow = CheckoutFlow::start(&store).await;
    fill_form(&mut flow);

    let result = flow.submit(&store, &mut cart).await;

    assert!(matches!(result, Err(CheckoutError::Store(_))));
    assert_eq!(flow.phase(), CheckoutPhase::Editing);
    // The raw backend message is surfaced on the banner.
    match flow.banner() {
        Some(SubmitBanner::Failed(message)) => assert!(message.contains("internal error")),
        other => panic!("expected failure banner, got {other:?}"),
    }
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), Price::dinars(4000));
    assert!(store.placed_orders().is_empty());
}

#[tokio::test]
async fn test_missing_column_shows_schema_banner() {
    let store = FakeStore::stocked()
        .with_order_failure(400, "column orders.custom_baladiya does not exist");
    let catalog = Catalog::load(&store).await;
    let tee = catalog.product(fixtures::TSHIRT_ID).expect("tee loaded");

    let mut cart = CartStore::new();
    cart.add(tee, "M", "Red", 1);

    let mut flow = CheckoutFlow::start(&store).await;
    fill_form(&mut flow);

    let result = flow.submit(&store, &mut cart).await;

    assert!(result.is_err());
    assert_eq!(flow.banner(), Some(&SubmitBanner::SchemaOutOfDate));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_the_store() {
    let store = FakeStore::stocked();
    let catalog = Catalog::load(&store).await;
    let tee = catalog.product(fixtures::TSHIRT_ID).expect("tee loaded");

    let mut cart = CartStore::new();
    cart.add(tee, "M", "Red", 1);

    let mut flow = CheckoutFlow::start(&store).await;
    {
        let form = flow.form_mut().expect("flow should be editable");
        form.set_first_name("Amine");
        form.set_last_name("Benali");
        form.set_phone("1234"); // invalid
        form.select_wilaya(fixtures::ALGIERS_ID);
        form.set_baladiya("Bab El Oued");
    }

    let result = flow.submit(&store, &mut cart).await;

    assert!(matches!(result, Err(CheckoutError::Form(FormError::Phone(_)))));
    assert_eq!(flow.phase(), CheckoutPhase::Editing);
    assert!(store.placed_orders().is_empty());
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn test_empty_cart_cannot_submit() {
    let store = FakeStore::stocked();
    let mut cart = CartStore::new();
    let mut flow = CheckoutFlow::start(&store).await;
    fill_form(&mut flow);

    let result = flow.submit(&store, &mut cart).await;

    assert!(matches!(
        result,
        Err(CheckoutError::Form(FormError::EmptyCart))
    ));
    assert!(store.placed_orders().is_empty());
}

#[tokio::test]
async fn test_home_delivery_prices_and_address() {
    let store = FakeStore::stocked();
    let catalog = Catalog::load(&store).await;
    let tee = catalog.product(fixtures::TSHIRT_ID).expect("tee loaded");

    let mut cart = CartStore::new();
    cart.add(tee, "M", "Black", 1);

    let mut flow = CheckoutFlow::start(&store).await;
    {
        let form = flow.form_mut().expect("flow should be editable");
        form.set_first_name("Lina");
        form.set_last_name("Cherif");
        form.set_phone("0661234567");
        form.select_wilaya(fixtures::ORAN_ID);
        form.set_baladiya("Es Senia");
        form.set_delivery_method(DeliveryMethod::Home);
    }

    // Address missing for home delivery.
    let result = flow.submit(&store, &mut cart).await;
    assert!(matches!(
        result,
        Err(CheckoutError::Form(FormError::MissingAddress))
    ));

    flow.form_mut()
        .expect("flow should be editable")
        .set_address("12 Rue de la Gare");
    flow.submit(&store, &mut cart)
        .await
        .expect("submission should succeed");

    let placed = store.placed_orders();
    let (order, _) = &placed[0];
    assert_eq!(order.shipping_fee, Price::dinars(800));
    assert_eq!(order.total_amount, Price::dinars(2800));
    assert_eq!(order.address.as_deref(), Some("12 Rue de la Gare"));
}
