//! Site settings singleton.
//!
//! A single remote record drives the page chrome: title, logos, the about
//! page, and social links. It is read once at startup; a missing or failing
//! record degrades to defaults so the storefront still renders.

use boutik_core::LocalizedText;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::StoreGateway;

/// Site-wide chrome configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_logo: String,
    pub favicon: String,
    pub about_description: LocalizedText,
    pub phone_number: String,
    pub about_logo: String,
    /// Google Maps embed URL for the store location.
    pub store_location_url: String,
    pub instagram_url: String,
    pub facebook_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Boutik".to_string(),
            site_logo: String::new(),
            favicon: String::new(),
            about_description: LocalizedText::default(),
            phone_number: String::new(),
            about_logo: String::new(),
            store_location_url: String::new(),
            instagram_url: String::new(),
            facebook_url: String::new(),
        }
    }
}

/// Load site settings, falling back to defaults on error.
pub async fn load_settings<G: StoreGateway>(gateway: &G) -> SiteSettings {
    match gateway.fetch_settings().await {
        Ok(settings) => settings,
        Err(error) => {
            warn!(%error, "failed to fetch site settings, using defaults");
            SiteSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_site_name() {
        let settings = SiteSettings::default();
        assert_eq!(settings.site_name, "Boutik");
        assert!(settings.instagram_url.is_empty());
    }
}
