//! Supabase/PostgREST client for the hosted store.
//!
//! Row types mirror the remote tables; conversions map them onto the view
//! models the rest of the crate uses. Catalog reads go through a short TTL
//! cache, the order write never does.

mod cache;
mod client;
mod conversions;
mod rows;

pub use client::SupabaseClient;

use thiserror::Error;

/// Errors surfaced by the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (DNS, TLS, timeout).
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected row shape.
    #[error("store response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// PostgREST replied with a non-success status.
    #[error("store api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A singleton row (site settings) is missing.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl StoreError {
    /// Whether the remote complained about a column it does not know.
    ///
    /// PostgREST names the offending column in its error message; checkout
    /// uses this to detect a stale `orders` schema.
    #[must_use]
    pub fn mentions_column(&self, column: &str) -> bool {
        matches!(self, Self::Api { message, .. } if message.contains(column))
    }
}
