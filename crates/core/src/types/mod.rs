//! Shared type definitions.

mod id;
mod status;
mod view;

pub use id::{CycleId, OrderId, UserId};
pub use status::{
    CancellationAction, OrderAction, OrderFacts, OrderStatus, PaymentMethod, Role,
    TransitionPolicy,
};
pub use view::ViewState;
