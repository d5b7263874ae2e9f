//! Catalog view models and the startup catalog loader.
//!
//! The loader fetches categories and products once through the gateway and
//! keeps them in memory for the session. Fetch failures are logged and
//! degrade to empty lists; browsing stays functional with whatever loaded.

use boutik_core::{CategoryId, LocalizedText, Price, ProductId, VariantId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gateway::StoreGateway;

/// How many related products a detail view shows.
const RELATED_LIMIT: usize = 4;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: LocalizedText,
    pub image_url: String,
}

/// A specific size+color combination of a product, carrying its own stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    /// Stock count for this combination; zero means sold out.
    pub quantity: u32,
    pub sku: Option<String>,
}

/// A sellable product with its variant matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: Option<CategoryId>,
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// Current selling price. Display logic assumes `price <=
    /// original_price` when an original price is present.
    pub price: Price,
    pub original_price: Option<Price>,
    pub image_url: String,
    /// Category display name, denormalized from the joined category row.
    pub category_name: String,
    /// Ordered as stored; `(size, color)` is unique within one product.
    pub variants: Vec<Variant>,
}

impl Product {
    /// Find the variant matching a (size, color) pair.
    #[must_use]
    pub fn variant(&self, size: &str, color: &str) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.size == size && v.color == color)
    }

    /// Stock for a (size, color) pair; 0 when the pair matches no variant.
    #[must_use]
    pub fn stock(&self, size: &str, color: &str) -> u32 {
        self.variant(size, color).map_or(0, |v| v.quantity)
    }

    /// Unique sizes in first-occurrence order.
    #[must_use]
    pub fn sizes(&self) -> Vec<&str> {
        let mut sizes = Vec::new();
        for variant in &self.variants {
            if !sizes.contains(&variant.size.as_str()) {
                sizes.push(variant.size.as_str());
            }
        }
        sizes
    }

    /// Unique colors in first-occurrence order.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        let mut colors = Vec::new();
        for variant in &self.variants {
            if !colors.contains(&variant.color.as_str()) {
                colors.push(variant.color.as_str());
            }
        }
        colors
    }

    /// Whether any color of this size has stock. Sizes failing this render
    /// disabled in the selector.
    #[must_use]
    pub fn size_has_stock(&self, size: &str) -> bool {
        self.variants
            .iter()
            .any(|v| v.size == size && v.quantity > 0)
    }

    /// Whether the product shows a sale badge.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// In-memory catalog snapshot for the session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// An empty catalog (nothing loaded yet).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            categories: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Load categories and products through the gateway.
    ///
    /// Each fetch degrades independently to an empty list on error; the
    /// error is logged, never surfaced to the customer.
    pub async fn load<G: StoreGateway>(gateway: &G) -> Self {
        let categories = match gateway.fetch_categories().await {
            Ok(categories) => categories,
            Err(error) => {
                warn!(%error, "failed to fetch categories, degrading to empty list");
                Vec::new()
            }
        };

        let products = match gateway.fetch_products().await {
            Ok(products) => products,
            Err(error) => {
                warn!(%error, "failed to fetch products, degrading to empty list");
                Vec::new()
            }
        };

        info!(
            categories = categories.len(),
            products = products.len(),
            "catalog loaded"
        );

        Self {
            categories,
            products,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products belonging to a category.
    pub fn products_in_category(&self, id: CategoryId) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| p.category_id == Some(id))
    }

    /// Up to four other products from the same category.
    #[must_use]
    pub fn related_products(&self, product: &Product) -> Vec<&Product> {
        let Some(category_id) = product.category_id else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.category_id == Some(category_id) && p.id != product.id)
            .take(RELATED_LIMIT)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{sold_out_hoodie, tshirt};
    use super::*;

    #[test]
    fn test_variant_resolution() {
        let product = tshirt();
        assert_eq!(
            product.variant("M", "Red").map(|v| v.id),
            Some(VariantId::new(11))
        );
        assert!(product.variant("XL", "Red").is_none());
    }

    #[test]
    fn test_stock_unmatched_pair_is_zero() {
        let product = tshirt();
        assert_eq!(product.stock("M", "Red"), 5);
        assert_eq!(product.stock("XL", "Green"), 0);
    }

    #[test]
    fn test_unique_sizes_and_colors() {
        let product = tshirt();
        assert_eq!(product.sizes(), vec!["M", "L"]);
        assert_eq!(product.colors(), vec!["Red", "Black"]);
    }

    #[test]
    fn test_size_has_stock() {
        let product = tshirt();
        assert!(product.size_has_stock("M"));
        assert!(product.size_has_stock("L")); // (L, Red) still has one

        let hoodie = sold_out_hoodie();
        assert!(!hoodie.size_has_stock("M"));
    }

    #[test]
    fn test_on_sale() {
        assert!(tshirt().on_sale());
        assert!(!sold_out_hoodie().on_sale());
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = Catalog {
            categories: Vec::new(),
            products: vec![tshirt(), sold_out_hoodie()],
        };

        assert_eq!(
            catalog.product(ProductId::new(2)).map(|p| p.id),
            Some(ProductId::new(2))
        );
        assert!(catalog.product(ProductId::new(99)).is_none());
        assert_eq!(
            catalog.products_in_category(CategoryId::new(10)).count(),
            2
        );
    }

    #[test]
    fn test_related_products_excludes_self_and_limits() {
        let mut products = vec![tshirt()];
        for i in 0..6 {
            let mut p = sold_out_hoodie();
            p.id = ProductId::new(100 + i);
            products.push(p);
        }
        let catalog = Catalog {
            categories: Vec::new(),
            products,
        };

        let tee = tshirt();
        let related = catalog.related_products(&tee);
        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|p| p.id != tee.id));
    }
}
