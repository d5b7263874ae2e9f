//! Remote store gateway interface.
//!
//! Every component reaches the hosted store through [`StoreGateway`] instead
//! of an ambient client, so catalog and checkout logic can be exercised
//! against an in-memory fake. The production implementation is
//! [`crate::store::SupabaseClient`].

use boutik_core::{
    DeliveryMethod, OrderId, OrderStatus, PhoneNumber, Price, ProductId, VariantId, WilayaId,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::delivery::Wilaya;
use crate::settings::SiteSettings;
use crate::store::StoreError;

/// Read/write access to the hosted store collections.
///
/// Reads power the catalog, the wilaya pricing table, and site chrome.
/// The single write, [`StoreGateway::place_order`], inserts an order and its
/// items atomically; implementations must guarantee that a returned error
/// means nothing was persisted.
pub trait StoreGateway {
    /// Fetch all categories, ordered by id.
    fn fetch_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;

    /// Fetch all products with their variants and joined category name.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send;

    /// Fetch the wilaya delivery-pricing table, ordered by code.
    fn fetch_wilayas(&self) -> impl Future<Output = Result<Vec<Wilaya>, StoreError>> + Send;

    /// Fetch the site settings singleton.
    fn fetch_settings(&self) -> impl Future<Output = Result<SiteSettings, StoreError>> + Send;

    /// Persist an order and its items in one transaction, returning the
    /// generated order id.
    fn place_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> impl Future<Output = Result<OrderId, StoreError>> + Send;
}

/// Write contract for the orders collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub first_name: String,
    pub last_name: String,
    pub phone: PhoneNumber,
    pub wilaya_id: WilayaId,
    /// Free-text municipality typed by the customer.
    pub custom_baladiya: String,
    pub address: Option<String>,
    pub instagram_handle: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub shipping_fee: Price,
    pub total_amount: Price,
    pub status: OrderStatus,
}

/// Write contract for the order items collection.
///
/// `price_at_purchase` captures the unit price at submit time so historical
/// order value is decoupled from future catalog price changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub quantity: u32,
    pub price_at_purchase: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_wire_shape() {
        let order = NewOrder {
            first_name: "Amine".to_string(),
            last_name: "B".to_string(),
            phone: PhoneNumber::parse("0512345678").unwrap(),
            wilaya_id: WilayaId::new(16),
            custom_baladiya: "Bab El Oued".to_string(),
            address: None,
            instagram_handle: None,
            delivery_method: DeliveryMethod::Stopdesk,
            shipping_fee: Price::dinars(400),
            total_amount: Price::dinars(4400),
            status: OrderStatus::Pending,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["delivery_method"], "stopdesk");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["wilaya_id"], 16);
        assert_eq!(json["custom_baladiya"], "Bab El Oued");
    }

    #[test]
    fn test_new_order_item_wire_shape() {
        let item = NewOrderItem {
            product_id: ProductId::new(3),
            variant_id: VariantId::UNKNOWN,
            quantity: 2,
            price_at_purchase: Price::dinars(2000),
        };

        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["product_id"], 3);
        assert_eq!(json["variant_id"], 0);
        assert_eq!(json["quantity"], 2);
    }
}
