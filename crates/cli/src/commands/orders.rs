//! Order commands, customer and admin.

use cycle_bazaar_core::{CancellationAction, OrderAction, OrderId, OrderStatus, ViewState};
use cycle_bazaar_storefront::views::{MyOrdersView, OrderLifecycleView};

use crate::commands::Context;

pub async fn my_orders(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = MyOrdersView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    let orders = view.state.into_result()?;

    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    for order in &orders {
        println!(
            "{}  {}  ₹{}  paid: {}",
            order.id, order.status, order.total_price, order.is_paid
        );
    }
    Ok(())
}

pub async fn show(
    ctx: &Context,
    id: &str,
    admin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = OrderLifecycleView::new(ctx.api.clone(), OrderId::new(id), admin);
    view.load(&ctx.session).await;
    let actions = view.actions(&ctx.session);
    let pending_payment = view.client_secret().is_some();
    let order = view.state.into_result()?;

    println!("order {}", order.id);
    println!("status: {}", order.status);
    for item in &order.order_items {
        println!("  {} x{}  ₹{}", item.name, item.qty, item.price);
    }
    println!(
        "items ₹{}  shipping ₹{}  tax ₹{}  total ₹{}",
        order.items_price, order.shipping_price, order.tax_price, order.total_price
    );
    println!("payment: {} (paid: {})", order.payment_method, order.is_paid);
    if let Some(details) = &order.cancellation_details {
        println!("cancellation requested: {}", details.reason);
    }
    if pending_payment {
        println!("payment pending; pay from the web checkout");
    }
    if !actions.is_empty() {
        println!("available actions:");
        for action in actions {
            match action {
                OrderAction::RequestCancellation => println!("  cancel --reason <text>"),
                OrderAction::SetStatus(status) => println!("  status \"{status}\""),
                OrderAction::ApproveCancellation => println!("  manage approve"),
                OrderAction::RejectCancellation => println!("  manage reject"),
                OrderAction::MarkPaid => println!("  mark-paid"),
            }
        }
    }
    Ok(())
}

pub async fn cancel(
    ctx: &Context,
    id: &str,
    reason: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = OrderLifecycleView::new(ctx.api.clone(), OrderId::new(id), false);
    view.load(&ctx.session).await;
    let message = view.request_cancellation(&ctx.session, reason).await?;
    println!("{message}");
    Ok(())
}

pub async fn set_status(
    ctx: &Context,
    id: &str,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let status: OrderStatus = status.parse()?;
    let mut view = OrderLifecycleView::new(ctx.api.clone(), OrderId::new(id), true);
    view.load(&ctx.session).await;
    view.update_status(&ctx.session, status).await?;
    if let ViewState::Ready(order) = &view.state {
        println!("status: {}", order.status);
    }
    Ok(())
}

pub async fn mark_paid(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = OrderLifecycleView::new(ctx.api.clone(), OrderId::new(id), true);
    view.load(&ctx.session).await;
    view.mark_paid(&ctx.session).await?;
    println!("Order marked as paid.");
    Ok(())
}

pub async fn manage(
    ctx: &Context,
    id: &str,
    action: CancellationAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = OrderLifecycleView::new(ctx.api.clone(), OrderId::new(id), true);
    view.load(&ctx.session).await;
    let message = view.manage_cancellation(&ctx.session, action).await?;
    println!("{message}");
    Ok(())
}
