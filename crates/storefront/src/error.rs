//! Unified error handling.
//!
//! Provides a unified `AppError` type for embedding callers (a web layer or
//! a CLI) that want one error to bubble up instead of matching the
//! per-module enums.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Remote store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}
