//! Admin screen view models.

pub mod dashboard;
pub mod edit_cycle;
pub mod orders;
pub mod users;

pub use dashboard::{AddCycleForm, AdminDashboardView};
pub use edit_cycle::EditCycleView;
pub use orders::AdminOrdersView;
pub use users::UserListView;
