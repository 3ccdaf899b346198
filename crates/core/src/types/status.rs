//! Order status machine, roles, and payment methods.
//!
//! The server owns the status field; the client only requests transitions.
//! Which transitions may be requested used to be scattered across screen
//! conditionals - here they live in one table,
//! [`OrderStatus::available_actions`], shared by the customer and admin
//! order views.

use serde::{Deserialize, Serialize};

/// Order lifecycle status as stored by the server.
///
/// Terminal states are `Delivered` and `Cancelled`; no action may be
/// requested once either is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[serde(rename = "Cancellation Requested")]
    CancellationRequested,
    Cancelled,
    Delivered,
}

impl OrderStatus {
    /// Whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The wire/display form of the status (matches server storage).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::CancellationRequested => "Cancellation Requested",
            Self::Cancelled => "Cancelled",
            Self::Delivered => "Delivered",
        }
    }

    /// The actions the given viewer may request for an order in this status.
    ///
    /// This is the single source of truth for which controls a screen
    /// renders. Customers only ever see the cancellation request while the
    /// order is still `Processing`; admin actions additionally require the
    /// admin-originated navigation flag (`admin_view`), mirroring the
    /// customer-facing route never exposing them.
    #[must_use]
    pub fn available_actions(
        self,
        role: Role,
        admin_view: bool,
        facts: OrderFacts,
        policy: TransitionPolicy,
    ) -> Vec<OrderAction> {
        if self.is_terminal() {
            return Vec::new();
        }

        if role == Role::Customer || !admin_view {
            return if self == Self::Processing {
                vec![OrderAction::RequestCancellation]
            } else {
                Vec::new()
            };
        }

        let mut actions = Vec::new();

        if self == Self::CancellationRequested {
            actions.push(OrderAction::ApproveCancellation);
            actions.push(OrderAction::RejectCancellation);
        }

        for target in self.status_targets(facts, policy) {
            actions.push(OrderAction::SetStatus(target));
        }

        if facts.payment_method == PaymentMethod::Cod && !facts.is_paid {
            actions.push(OrderAction::MarkPaid);
        }

        actions
    }

    /// Status values the admin dropdown offers from this status.
    fn status_targets(self, facts: OrderFacts, policy: TransitionPolicy) -> Vec<Self> {
        let candidates = [
            Self::Processing,
            Self::Shipped,
            Self::OutForDelivery,
            Self::Cancelled,
            Self::Delivered,
        ];

        candidates
            .into_iter()
            .filter(|target| *target != self)
            .filter(|target| match policy {
                TransitionPolicy::Permissive => true,
                // Delivery is only offered once payment has settled.
                TransitionPolicy::Guarded => *target != Self::Delivered || facts.is_paid,
            })
            .collect()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Out for Delivery" => Ok(Self::OutForDelivery),
            "Cancellation Requested" => Ok(Self::CancellationRequested),
            "Cancelled" => Ok(Self::Cancelled),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Viewer role for action gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Admin,
}

/// How an order is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Card payment processed online through the payment widget.
    #[default]
    Stripe,
    /// Pay on delivery; an admin marks the order paid by hand.
    #[serde(rename = "COD")]
    Cod,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stripe => f.write_str("Stripe"),
            Self::Cod => f.write_str("COD"),
        }
    }
}

/// Order facts, beyond the status itself, that gate transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderFacts {
    pub is_paid: bool,
    pub payment_method: PaymentMethod,
}

/// A transition request the current viewer may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    /// Customer asks for cancellation; sets a pending request for admin
    /// review rather than changing the status directly.
    RequestCancellation,
    /// Admin moves the order to the given status.
    SetStatus(OrderStatus),
    /// Admin approves a pending cancellation request.
    ApproveCancellation,
    /// Admin rejects a pending cancellation request, restoring the prior
    /// status.
    RejectCancellation,
    /// Admin marks a pay-on-delivery order as paid.
    MarkPaid,
}

/// Policy for which admin status jumps the client offers.
///
/// The source system let an admin pick any target status without ordering
/// enforcement; whether that is intentional is undecidable from the client,
/// so the behavior is configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Offer only the targets the screens historically rendered:
    /// `Delivered` requires the order to be paid.
    #[default]
    Guarded,
    /// Offer every non-terminal-origin jump, including out-of-order ones
    /// such as `Processing -> Delivered` while unpaid.
    Permissive,
}

/// Admin verdict on a pending cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancellationAction {
    Approve,
    Reject,
}

impl CancellationAction {
    /// The wire form sent to `PUT /api/orders/:id/manage-cancellation`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}
