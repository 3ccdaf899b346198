//! Cycle Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Cycle Bazaar client
//! components:
//! - `client` - Remote API client and shared state containers
//! - `storefront` - Customer-facing screen view models
//! - `admin` - Administration screen view models
//! - `cli` - Terminal shell driving the view models
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order status machine, roles, payment methods
//! - [`totals`] - Client-advisory checkout price computation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod totals;
pub mod types;

pub use totals::CheckoutTotals;
pub use types::*;
