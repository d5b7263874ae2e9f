//! Application state shared across the storefront session.

use std::sync::Arc;

use boutik_core::Language;

use crate::config::{ConfigError, StorefrontConfig};
use crate::store::SupabaseClient;

/// Application state shared across all storefront components.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the remote store client.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    store: SupabaseClient,
}

impl AppState {
    /// Create application state from an already-loaded configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = SupabaseClient::new(&config.supabase);

        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Load configuration from the environment and build the state.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(StorefrontConfig::from_env()?))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the remote store client.
    #[must_use]
    pub fn store(&self) -> &SupabaseClient {
        &self.inner.store
    }

    /// Default display language for this deployment.
    #[must_use]
    pub fn language(&self) -> Language {
        self.inner.config.language
    }
}
