//! Row-to-view-model conversions.

use boutik_core::{LocalizedText, Price};

use crate::catalog::{Category, Product, Variant};
use crate::delivery::Wilaya;
use crate::settings::SiteSettings;

use super::rows::{CategoryRow, ProductRow, SettingsRow, VariantRow, WilayaRow};

pub fn convert_category(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: LocalizedText::new(row.name_en, row.name_ar),
        image_url: row.image_url.unwrap_or_default(),
    }
}

pub fn convert_product(row: ProductRow) -> Product {
    Product {
        id: row.id,
        category_id: row.category_id,
        name: LocalizedText::new(row.name_en, row.name_ar),
        description: LocalizedText::new(
            row.description_en.unwrap_or_default(),
            row.description_ar.unwrap_or_default(),
        ),
        price: Price::new(row.price),
        original_price: row.original_price.map(Price::new),
        image_url: row.image_url.unwrap_or_default(),
        category_name: row.categories.map(|c| c.name_en).unwrap_or_default(),
        variants: row.product_variants.into_iter().map(convert_variant).collect(),
    }
}

fn convert_variant(row: VariantRow) -> Variant {
    Variant {
        id: row.id,
        size: row.size,
        color: row.color,
        // Oversold rows come back negative; the storefront treats them
        // the same as zero.
        quantity: u32::try_from(row.quantity).unwrap_or(0),
        sku: row.sku,
    }
}

pub fn convert_wilaya(row: WilayaRow) -> Wilaya {
    Wilaya {
        id: row.id,
        code: row.code,
        name: LocalizedText::new(row.name_en, row.name_ar),
        home_price: Price::new(row.home_delivery_price),
        desk_price: Price::new(row.stopdesk_delivery_price),
    }
}

pub fn convert_settings(row: SettingsRow) -> SiteSettings {
    let defaults = SiteSettings::default();
    SiteSettings {
        site_name: row.site_name.unwrap_or(defaults.site_name),
        site_logo: row.site_logo.unwrap_or_default(),
        favicon: row.favicon.unwrap_or_default(),
        about_description: LocalizedText::new(
            row.about_description_en.unwrap_or_default(),
            row.about_description_ar.unwrap_or_default(),
        ),
        phone_number: row.phone_number.unwrap_or_default(),
        about_logo: row.about_logo.unwrap_or_default(),
        store_location_url: row.store_location_url.unwrap_or_default(),
        instagram_url: row.instagram_url.unwrap_or_default(),
        facebook_url: row.facebook_url.unwrap_or_default(),
    }
}
