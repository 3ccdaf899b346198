//! Order lifecycle screen, shared by customers and admins.
//!
//! The same screen serves both audiences: a customer sees their order with
//! payment and cancellation controls, an admin additionally gets the status
//! dropdown and the cancellation-request verdict buttons. Which controls
//! appear is decided entirely by the action table in
//! [`OrderStatus::available_actions`]; this view only executes what that
//! table offers.

use cycle_bazaar_client::types::{AuthToken, Order};
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::{
    CancellationAction, OrderAction, OrderFacts, OrderId, OrderStatus, PaymentMethod, Role,
    TransitionPolicy, ViewState,
};
use tracing::instrument;

/// Order detail screen view model.
pub struct OrderLifecycleView {
    api: ApiClient,
    order_id: OrderId,
    admin_view: bool,
    policy: TransitionPolicy,
    pub state: ViewState<Order>,
    /// Stripe client secret for an unpaid card order, fetched alongside the
    /// order itself.
    client_secret: Option<String>,
    busy: bool,
}

impl OrderLifecycleView {
    #[must_use]
    pub const fn new(api: ApiClient, order_id: OrderId, admin_view: bool) -> Self {
        Self {
            api,
            order_id,
            admin_view,
            policy: TransitionPolicy::Guarded,
            state: ViewState::Loading,
            client_secret: None,
            busy: false,
        }
    }

    /// Switch to the permissive status dropdown.
    #[must_use]
    pub const fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// The Stripe secret for the pending payment, when one is open.
    #[must_use]
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Fetch the order, and for an unpaid card order also open a payment
    /// intent so the payment form can mount. A failed fetch renders the
    /// error alone.
    #[instrument(skip_all, fields(order_id = %self.order_id))]
    pub async fn load(&mut self, session: &SessionStore) {
        self.state = ViewState::Loading;
        self.client_secret = None;

        let Some(token) = session.token().cloned() else {
            self.state = ViewState::Error(ApiError::Unauthenticated.to_string());
            return;
        };

        let order = match self.api.get_order(&token, &self.order_id).await {
            Ok(order) => order,
            Err(e) => {
                self.state = ViewState::Error(e.to_string());
                return;
            }
        };

        if !order.is_paid && order.payment_method == PaymentMethod::Stripe {
            match self.api.create_payment_intent(&token, &self.order_id).await {
                Ok(intent) => self.client_secret = Some(intent.client_secret),
                Err(e) => {
                    // The order still renders; only the payment form is lost.
                    tracing::warn!("failed to open payment intent: {e}");
                }
            }
        }

        self.state = ViewState::Ready(order);
    }

    /// The transition controls to render for the current viewer.
    #[must_use]
    pub fn actions(&self, session: &SessionStore) -> Vec<OrderAction> {
        let Some(order) = self.state.ready() else {
            return Vec::new();
        };
        let role = if session.is_admin() {
            Role::Admin
        } else {
            Role::Customer
        };
        let facts = OrderFacts {
            is_paid: order.is_paid,
            payment_method: order.payment_method,
        };
        order
            .status
            .available_actions(role, self.admin_view, facts, self.policy)
    }

    /// Customer asks to cancel, with a reason. The status flips to
    /// `Cancellation Requested` server-side; the refetch shows it.
    ///
    /// # Errors
    ///
    /// Returns an error when the action is not currently offered or the
    /// request fails.
    #[instrument(skip_all, fields(order_id = %self.order_id))]
    pub async fn request_cancellation(
        &mut self,
        session: &SessionStore,
        reason: &str,
    ) -> Result<String, ApiError> {
        let token = self.begin(session, &OrderAction::RequestCancellation)?;
        let result = self
            .api
            .request_cancellation(&token, &self.order_id, reason)
            .await;
        self.finish(session, result.map(|m| m.message)).await
    }

    /// Admin moves the order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error when the target is not currently offered or the
    /// request fails.
    #[instrument(skip(self, session), fields(order_id = %self.order_id, status = %status))]
    pub async fn update_status(
        &mut self,
        session: &SessionStore,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let token = self.begin(session, &OrderAction::SetStatus(status))?;
        let result = self
            .api
            .update_order_status(&token, &self.order_id, status)
            .await;
        self.finish(session, result.map(|_| ())).await
    }

    /// Admin records payment received for a pay-on-delivery order.
    ///
    /// # Errors
    ///
    /// Returns an error when the action is not currently offered or the
    /// request fails.
    #[instrument(skip_all, fields(order_id = %self.order_id))]
    pub async fn mark_paid(&mut self, session: &SessionStore) -> Result<(), ApiError> {
        let token = self.begin(session, &OrderAction::MarkPaid)?;
        let result = self.api.pay_order(&token, &self.order_id, None).await;
        self.finish(session, result.map(|_| ())).await
    }

    /// Report a completed card payment, attaching the processor's receipt.
    ///
    /// # Errors
    ///
    /// Returns an error when no payment is pending or the request fails.
    #[instrument(skip_all, fields(order_id = %self.order_id))]
    pub async fn confirm_payment(
        &mut self,
        session: &SessionStore,
        receipt: &serde_json::Value,
    ) -> Result<(), ApiError> {
        if self.busy {
            return Err(ApiError::Validation("Request already in progress".into()));
        }
        if self.client_secret.is_none() {
            return Err(ApiError::Validation("No payment is pending".into()));
        }
        let Some(token) = session.token().cloned() else {
            return Err(ApiError::Unauthenticated);
        };

        self.busy = true;
        let result = self
            .api
            .pay_order(&token, &self.order_id, Some(receipt))
            .await;
        self.finish(session, result.map(|_| ())).await
    }

    /// Admin verdict on a pending cancellation request.
    ///
    /// # Errors
    ///
    /// Returns an error when no request is pending or the call fails.
    #[instrument(skip(self, session), fields(order_id = %self.order_id, action = action.as_str()))]
    pub async fn manage_cancellation(
        &mut self,
        session: &SessionStore,
        action: CancellationAction,
    ) -> Result<String, ApiError> {
        let wanted = match action {
            CancellationAction::Approve => OrderAction::ApproveCancellation,
            CancellationAction::Reject => OrderAction::RejectCancellation,
        };
        let token = self.begin(session, &wanted)?;
        let result = self
            .api
            .manage_cancellation(&token, &self.order_id, action)
            .await;
        self.finish(session, result.map(|m| m.message)).await
    }

    /// Common preamble for every mutation: reject double-submits, check the
    /// action is in the table, grab the token.
    fn begin(
        &mut self,
        session: &SessionStore,
        wanted: &OrderAction,
    ) -> Result<AuthToken, ApiError> {
        if self.busy {
            return Err(ApiError::Validation("Request already in progress".into()));
        }
        if !self.actions(session).contains(wanted) {
            return Err(ApiError::Validation(
                "That action is not available for this order".into(),
            ));
        }
        let Some(token) = session.token().cloned() else {
            return Err(ApiError::Unauthenticated);
        };
        self.busy = true;
        Ok(token)
    }

    /// Common epilogue: clear the busy flag and refetch so the screen shows
    /// the server's view of the order, success or failure.
    async fn finish<T>(
        &mut self,
        session: &SessionStore,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        self.busy = false;
        let value = result?;
        self.load(session).await;
        Ok(value)
    }
}
