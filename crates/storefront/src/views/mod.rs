//! Customer-facing screen view models.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod detail;
pub mod order;
pub mod orders;
pub mod wishlist;

pub use auth::{
    ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm, VerifyEmailView,
};
pub use cart::{CartLineView, CartPageView};
pub use catalog::{CatalogPage, CatalogView, PageLink, Pager};
pub use detail::{CycleDetailView, DetailFlags, detail_flags};
pub use order::OrderLifecycleView;
pub use orders::MyOrdersView;
pub use wishlist::WishlistView;
