//! Wilaya delivery-pricing table.
//!
//! Every wilaya carries two prices: door-to-door home delivery and
//! stop-desk pickup. The table is remote-loaded inside the checkout flow;
//! a load failure degrades to an empty table (the customer cannot submit
//! until a wilaya is selectable, matching the loading-forever behavior of
//! catalog fetches).

use boutik_core::{DeliveryMethod, LocalizedText, Price, WilayaId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::StoreGateway;

/// A top-level delivery zone with its two price tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wilaya {
    pub id: WilayaId,
    /// Sortable administrative code ("01".."58"); the table is ordered by it.
    pub code: String,
    pub name: LocalizedText,
    pub home_price: Price,
    pub desk_price: Price,
}

impl Wilaya {
    /// Price for a delivery method in this wilaya.
    #[must_use]
    pub const fn price_for(&self, method: DeliveryMethod) -> Price {
        match method {
            DeliveryMethod::Home => self.home_price,
            DeliveryMethod::Stopdesk => self.desk_price,
        }
    }
}

/// Delivery price for a (wilaya, method) selection.
///
/// Zero while no wilaya is selected; the checkout summary shows "-" until
/// the customer picks one.
#[must_use]
pub fn delivery_price(
    wilayas: &[Wilaya],
    selected: Option<WilayaId>,
    method: DeliveryMethod,
) -> Price {
    selected
        .and_then(|id| wilayas.iter().find(|w| w.id == id))
        .map_or(Price::ZERO, |wilaya| wilaya.price_for(method))
}

/// Load the wilaya table, degrading to empty on error.
pub async fn load_wilayas<G: StoreGateway>(gateway: &G) -> Vec<Wilaya> {
    match gateway.fetch_wilayas().await {
        Ok(wilayas) => wilayas,
        Err(error) => {
            warn!(%error, "failed to fetch wilayas, degrading to empty table");
            Vec::new()
        }
    }
}
