//! Boutik Storefront library.
//!
//! Catalog browsing, the session cart, and the cash-on-delivery checkout
//! flow, all backed by a hosted Supabase/PostgREST store reached through an
//! explicit [`gateway::StoreGateway`] so every component can be tested
//! against a fake implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod delivery;
pub mod error;
pub mod gateway;
pub mod product_page;
pub mod settings;
pub mod state;
pub mod store;
