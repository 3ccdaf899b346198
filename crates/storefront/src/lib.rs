//! Cycle Bazaar storefront view models.
//!
//! One view model per customer-facing screen. Each owns its fetch
//! lifecycle: it starts `Loading`, lands on exactly one of
//! `Error`/`Ready`, and exposes the mutating operations the screen offers.
//! Presentation is the caller's concern - these types hold state and
//! enforce the rules, they render nothing.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod views;

pub use checkout::{CheckoutSequencer, CheckoutStep};
