//! PostgREST row shapes for the hosted store tables.
//!
//! These mirror the remote schema column-for-column; conversions to the
//! crate's view models live next door in `conversions`.

use boutik_core::{CategoryId, ProductId, VariantId, WilayaId};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name_en: String,
    pub name_ar: String,
    pub image_url: Option<String>,
}

/// One row of `products`, selected with its embedded variants and the
/// joined category name:
/// `select=*,product_variants(*),categories(name_en)`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub category_id: Option<CategoryId>,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_variants: Vec<VariantRow>,
    /// Joined parent category; `None` for uncategorized products.
    pub categories: Option<CategoryNameRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNameRow {
    pub name_en: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantRow {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    /// May go negative remotely after concurrent oversells; clamped to zero
    /// on conversion.
    pub quantity: i64,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WilayaRow {
    pub id: WilayaId,
    pub code: String,
    pub name_en: String,
    pub name_ar: String,
    pub home_delivery_price: Decimal,
    pub stopdesk_delivery_price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsRow {
    pub site_name: Option<String>,
    pub site_logo: Option<String>,
    pub favicon: Option<String>,
    pub about_description_en: Option<String>,
    pub about_description_ar: Option<String>,
    pub phone_number: Option<String>,
    pub about_logo: Option<String>,
    pub store_location_url: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_with_embeds() {
        let json = r#"{
            "id": 7,
            "category_id": 2,
            "name_en": "Classic Tee",
            "name_ar": "قميص",
            "description_en": null,
            "description_ar": null,
            "price": 2000,
            "original_price": 2500.50,
            "image_url": "https://cdn.example.com/tee.jpg",
            "product_variants": [
                {"id": 11, "size": "M", "color": "Red", "quantity": 5, "sku": null}
            ],
            "categories": {"name_en": "T-Shirts"}
        }"#;

        let row: ProductRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, ProductId::new(7));
        assert_eq!(row.product_variants.len(), 1);
        assert_eq!(row.categories.unwrap().name_en, "T-Shirts");
        assert_eq!(row.original_price, Some(Decimal::new(25_0050, 2)));
    }

    #[test]
    fn test_product_row_missing_embeds_defaults_empty() {
        let json = r#"{
            "id": 8,
            "category_id": null,
            "name_en": "Cap",
            "name_ar": "قبعة",
            "price": 900,
            "categories": null
        }"#;

        let row: ProductRow = serde_json::from_str(json).unwrap();
        assert!(row.product_variants.is_empty());
        assert!(row.categories.is_none());
        assert_eq!(row.description_en, None);
    }

    #[test]
    fn test_wilaya_row() {
        let json = r#"{
            "id": 16,
            "code": "16",
            "name_en": "Algiers",
            "name_ar": "الجزائر",
            "home_delivery_price": 600,
            "stopdesk_delivery_price": 400
        }"#;

        let row: WilayaRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.home_delivery_price, Decimal::from(600));
    }
}
