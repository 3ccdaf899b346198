//! Cycle Bazaar admin view models.
//!
//! The screens behind the admin gate: catalog management, the order list,
//! and the user list. Destructive operations go through the injected
//! [`Prompt`] so a host can wire in whatever confirmation UI it has, and
//! tests can script the answers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod prompt;
pub mod views;

pub use prompt::{Prompt, StaticPrompt};
pub use views::{AddCycleForm, AdminDashboardView, AdminOrdersView, EditCycleView, UserListView};
