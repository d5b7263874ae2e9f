//! Integration test support for Boutik.
//!
//! Provides [`FakeStore`], an in-memory [`StoreGateway`] implementation, and
//! the catalog fixtures the end-to-end tests run against. Tests live under
//! `tests/` and exercise the whole customer journey without a network.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use boutik_core::{CategoryId, LocalizedText, OrderId, Price, ProductId, VariantId, WilayaId};
use boutik_storefront::catalog::{Category, Product, Variant};
use boutik_storefront::delivery::Wilaya;
use boutik_storefront::gateway::{NewOrder, NewOrderItem, StoreGateway};
use boutik_storefront::settings::SiteSettings;
use boutik_storefront::store::StoreError;

/// In-memory store gateway for tests.
///
/// Reads serve the configured fixtures; `place_order` records what it was
/// given and hands out sequential order ids, or fails with a configured
/// API error.
#[derive(Debug, Default)]
pub struct FakeStore {
    categories: Vec<Category>,
    products: Vec<Product>,
    wilayas: Vec<Wilaya>,
    settings: Option<SiteSettings>,
    /// When set, every read fails with this status/message.
    read_failure: Option<(u16, String)>,
    /// When set, `place_order` fails with this status/message.
    order_failure: Option<(u16, String)>,
    orders: Mutex<Vec<(NewOrder, Vec<NewOrderItem>)>>,
    next_order_id: AtomicI32,
}

impl FakeStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicI32::new(1),
            ..Self::default()
        }
    }

    /// A store stocked with the standard catalog and wilaya fixtures.
    #[must_use]
    pub fn stocked() -> Self {
        let mut store = Self::new();
        store.categories = vec![fixtures::apparel_category()];
        store.products = vec![fixtures::tshirt(), fixtures::sold_out_hoodie()];
        store.wilayas = vec![fixtures::algiers(), fixtures::oran()];
        store
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SiteSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Make every read fail.
    #[must_use]
    pub fn with_read_failure(mut self, status: u16, message: &str) -> Self {
        self.read_failure = Some((status, message.to_string()));
        self
    }

    /// Make `place_order` fail.
    #[must_use]
    pub fn with_order_failure(mut self, status: u16, message: &str) -> Self {
        self.order_failure = Some((status, message.to_string()));
        self
    }

    /// Orders recorded by successful `place_order` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn placed_orders(&self) -> Vec<(NewOrder, Vec<NewOrderItem>)> {
        self.orders
            .lock()
            .expect("orders lock poisoned")
            .clone()
    }

    fn read_result<T>(&self, value: T) -> Result<T, StoreError> {
        match &self.read_failure {
            Some((status, message)) => Err(StoreError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(value),
        }
    }
}

impl StoreGateway for FakeStore {
    async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.read_result(self.categories.clone())
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.read_result(self.products.clone())
    }

    async fn fetch_wilayas(&self) -> Result<Vec<Wilaya>, StoreError> {
        self.read_result(self.wilayas.clone())
    }

    async fn fetch_settings(&self) -> Result<SiteSettings, StoreError> {
        let settings = self
            .settings
            .clone()
            .ok_or(StoreError::NotFound("site settings"))?;
        self.read_result(settings)
    }

    async fn place_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<OrderId, StoreError> {
        if let Some((status, message)) = &self.order_failure {
            return Err(StoreError::Api {
                status: *status,
                message: message.clone(),
            });
        }

        self.orders
            .lock()
            .expect("orders lock poisoned")
            .push((order, items));
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        Ok(OrderId::new(id))
    }
}

/// Catalog and delivery fixtures shared by the end-to-end tests.
pub mod fixtures {
    use super::{
        Category, CategoryId, LocalizedText, Price, Product, ProductId, Variant, VariantId,
        Wilaya, WilayaId,
    };

    pub const TSHIRT_ID: ProductId = ProductId::new(1);
    pub const HOODIE_ID: ProductId = ProductId::new(2);
    pub const APPAREL_ID: CategoryId = CategoryId::new(10);
    pub const ALGIERS_ID: WilayaId = WilayaId::new(16);
    pub const ORAN_ID: WilayaId = WilayaId::new(31);

    #[must_use]
    pub fn apparel_category() -> Category {
        Category {
            id: APPAREL_ID,
            name: LocalizedText::new("Apparel", "ملابس"),
            image_url: "https://cdn.example.com/apparel.jpg".to_string(),
        }
    }

    /// 2000 DA tee with an M/L × Red/Black matrix; (L, Black) is sold out.
    #[must_use]
    pub fn tshirt() -> Product {
        Product {
            id: TSHIRT_ID,
            category_id: Some(APPAREL_ID),
            name: LocalizedText::new("Classic Tee", "قميص كلاسيكي"),
            description: LocalizedText::new("Plain cotton tee", "قميص قطني"),
            price: Price::dinars(2000),
            original_price: Some(Price::dinars(2500)),
            image_url: "https://cdn.example.com/tee.jpg".to_string(),
            category_name: "Apparel".to_string(),
            variants: vec![
                variant(11, "M", "Red", 5),
                variant(12, "M", "Black", 2),
                variant(13, "L", "Red", 1),
                variant(14, "L", "Black", 0),
            ],
        }
    }

    /// A product whose single variant has zero stock.
    #[must_use]
    pub fn sold_out_hoodie() -> Product {
        Product {
            id: HOODIE_ID,
            category_id: Some(APPAREL_ID),
            name: LocalizedText::new("Hoodie", "هودي"),
            description: LocalizedText::new("Heavy hoodie", "هودي ثقيل"),
            price: Price::dinars(4500),
            original_price: None,
            image_url: "https://cdn.example.com/hoodie.jpg".to_string(),
            category_name: "Apparel".to_string(),
            variants: vec![variant(21, "M", "Red", 0)],
        }
    }

    /// Algiers: 600 DA home, 400 DA stopdesk.
    #[must_use]
    pub fn algiers() -> Wilaya {
        Wilaya {
            id: ALGIERS_ID,
            code: "16".to_string(),
            name: LocalizedText::new("Algiers", "الجزائر"),
            home_price: Price::dinars(600),
            desk_price: Price::dinars(400),
        }
    }

    /// Oran: 800 DA home, 500 DA stopdesk.
    #[must_use]
    pub fn oran() -> Wilaya {
        Wilaya {
            id: ORAN_ID,
            code: "31".to_string(),
            name: LocalizedText::new("Oran", "وهران"),
            home_price: Price::dinars(800),
            desk_price: Price::dinars(500),
        }
    }

    fn variant(id: i32, size: &str, color: &str, quantity: u32) -> Variant {
        Variant {
            id: VariantId::new(id),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
            sku: None,
        }
    }
}
