//! Core types for Boutik.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod phone;
pub mod price;
pub mod status;

pub use id::*;
pub use locale::{Direction, Language, LocalizedText};
pub use phone::{PhoneError, PhoneNumber};
pub use price::Price;
pub use status::*;
