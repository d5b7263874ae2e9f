//! Supabase PostgREST client.
//!
//! Uses `reqwest` against the project's `/rest/v1` endpoint. Catalog reads
//! are cached with `moka` (5-minute TTL); the `place_order` RPC bypasses the
//! cache entirely so a write failure is always observed.

use std::sync::Arc;
use std::time::Duration;

use boutik_core::OrderId;
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::catalog::{Category, Product};
use crate::config::SupabaseConfig;
use crate::delivery::Wilaya;
use crate::gateway::{NewOrder, NewOrderItem, StoreGateway};
use crate::settings::SiteSettings;

use super::StoreError;
use super::cache::{CacheKey, CacheValue};
use super::conversions::{convert_category, convert_product, convert_settings, convert_wilaya};
use super::rows::{CategoryRow, ProductRow, SettingsRow, WilayaRow};

const CACHE_TTL: Duration = Duration::from_secs(300);
const ERROR_BODY_LIMIT: usize = 500;

/// Client for the hosted store's PostgREST endpoint.
///
/// Cheap to clone; all state sits behind one `Arc`.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    rest_url: String,
    anon_key: String,
    cache: Cache<CacheKey, CacheValue>,
}

/// Named arguments of the `place_order` database function.
#[derive(Serialize)]
struct PlaceOrderArgs {
    order_data: NewOrder,
    items_data: Vec<NewOrderItem>,
}

impl SupabaseClient {
    /// Create a client for a Supabase project.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CACHE_TTL)
            .build();

        // Url always renders with a trailing slash on the root path.
        let rest_url = format!("{}rest/v1", config.url);

        Self {
            inner: Arc::new(SupabaseClientInner {
                client: reqwest::Client::new(),
                rest_url,
                anon_key: config.anon_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// GET a table through PostgREST and decode the row list.
    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/{table}", self.inner.rest_url);
        let response = self
            .inner
            .client
            .get(&url)
            .query(query)
            .header("apikey", &self.inner.anon_key)
            .header("Authorization", format!("Bearer {}", self.inner.anon_key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                table,
                body = %body.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "store read returned non-success status"
            );
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl StoreGateway for SupabaseClient {
    #[instrument(skip(self))]
    async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let rows: Vec<CategoryRow> = self
            .get_rows("categories", &[("select", "*"), ("order", "id.asc")])
            .await?;
        let categories: Vec<Category> = rows.into_iter().map(convert_category).collect();

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("cache hit for products");
            return Ok(products);
        }

        let rows: Vec<ProductRow> = self
            .get_rows(
                "products",
                &[
                    ("select", "*,product_variants(*),categories(name_en)"),
                    ("order", "id.asc"),
                ],
            )
            .await?;
        let products: Vec<Product> = rows.into_iter().map(convert_product).collect();

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn fetch_wilayas(&self) -> Result<Vec<Wilaya>, StoreError> {
        if let Some(CacheValue::Wilayas(wilayas)) =
            self.inner.cache.get(&CacheKey::Wilayas).await
        {
            debug!("cache hit for wilayas");
            return Ok(wilayas);
        }

        let rows: Vec<WilayaRow> = self
            .get_rows("wilayas", &[("select", "*"), ("order", "code.asc")])
            .await?;
        let wilayas: Vec<Wilaya> = rows.into_iter().map(convert_wilaya).collect();

        self.inner
            .cache
            .insert(CacheKey::Wilayas, CacheValue::Wilayas(wilayas.clone()))
            .await;

        Ok(wilayas)
    }

    #[instrument(skip(self))]
    async fn fetch_settings(&self) -> Result<SiteSettings, StoreError> {
        if let Some(CacheValue::Settings(settings)) =
            self.inner.cache.get(&CacheKey::Settings).await
        {
            debug!("cache hit for settings");
            return Ok(*settings);
        }

        let rows: Vec<SettingsRow> = self
            .get_rows("site_settings", &[("select", "*"), ("limit", "1")])
            .await?;
        let settings = rows
            .into_iter()
            .next()
            .map(convert_settings)
            .ok_or(StoreError::NotFound("site settings"))?;

        self.inner
            .cache
            .insert(
                CacheKey::Settings,
                CacheValue::Settings(Box::new(settings.clone())),
            )
            .await;

        Ok(settings)
    }

    /// Calls the `place_order` database function, which inserts the order
    /// and its items inside one transaction and returns the new order id.
    /// A returned error therefore means nothing was persisted.
    #[instrument(skip_all, fields(items = items.len()))]
    async fn place_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<OrderId, StoreError> {
        let url = format!("{}/rpc/place_order", self.inner.rest_url);
        let args = PlaceOrderArgs {
            order_data: order,
            items_data: items,
        };

        let response = self
            .inner
            .client
            .post(&url)
            .header("apikey", &self.inner.anon_key)
            .header("Authorization", format!("Bearer {}", self.inner.anon_key))
            .json(&args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "place_order rpc returned non-success status"
            );
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        // The function returns the new order id as a bare integer.
        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("rest_url", &self.inner.rest_url)
            .field("anon_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
