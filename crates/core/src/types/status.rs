//! Status and method enums for orders.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order in the remote store.
///
/// Orders are created as `Pending`; a human operator confirms them by phone
/// and advances the status out-of-band (cash on delivery, no payment flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// How the carrier hands the parcel to the customer.
///
/// Each wilaya prices the two methods independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Customer collects from a carrier office (stop desk).
    #[default]
    Stopdesk,
    /// Door-to-door delivery; requires a street address.
    Home,
}

impl DeliveryMethod {
    /// Wire value used by the orders collection.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stopdesk => "stopdesk",
            Self::Home => "home",
        }
    }

    /// Whether this method requires a street address at checkout.
    #[must_use]
    pub const fn requires_address(&self) -> bool {
        matches!(self, Self::Home)
    }
}
