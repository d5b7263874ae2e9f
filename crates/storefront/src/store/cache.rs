//! Cache types for catalog reads.

use crate::catalog::{Category, Product};
use crate::delivery::Wilaya;
use crate::settings::SiteSettings;

/// Cache key per cached collection. Only reads are cached; the order write
/// never goes near this.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Products,
    Wilayas,
    Settings,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Products(Vec<Product>),
    Wilayas(Vec<Wilaya>),
    Settings(Box<SiteSettings>),
}
