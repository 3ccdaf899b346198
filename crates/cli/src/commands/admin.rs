//! Admin commands.

use cycle_bazaar_admin::views::{
    AddCycleForm, AdminDashboardView, AdminOrdersView, EditCycleView, UserListView,
};
use cycle_bazaar_core::{CancellationAction, CycleId, OrderId, OrderStatus, UserId, ViewState};

use crate::commands::{Context, TerminalPrompt};

pub async fn add_cycle(
    ctx: &Context,
    form: AddCycleForm,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = AdminDashboardView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    let message = view.add_cycle(&ctx.session, &form).await?;
    println!("{message}");
    Ok(())
}

pub async fn edit_cycle(
    ctx: &Context,
    id: &str,
    apply: impl FnOnce(&mut AddCycleForm),
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = EditCycleView::new(ctx.api.clone(), CycleId::new(id));
    view.load().await;
    if let ViewState::Ready(form) = &mut view.state {
        apply(form);
    }
    let message = view.save(&ctx.session).await?;
    println!("{message}");
    Ok(())
}

pub async fn delete_cycle(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = AdminDashboardView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    match view
        .delete_cycle(&ctx.session, &TerminalPrompt, &CycleId::new(id))
        .await?
    {
        Some(message) => println!("{message}"),
        None => println!("Aborted."),
    }
    Ok(())
}

pub async fn list_orders(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = AdminOrdersView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    let orders = view.state.into_result()?;

    for order in &orders {
        let who = order
            .user
            .as_ref()
            .map_or("(deleted user)", |user| user.name.as_str());
        println!(
            "{}  {}  {}  ₹{}  paid: {}",
            order.id, who, order.status, order.total_price, order.is_paid
        );
    }
    let pending = orders
        .iter()
        .filter(|order| order.status == OrderStatus::CancellationRequested)
        .count();
    if pending > 0 {
        println!("{pending} cancellation request(s) pending");
    }
    Ok(())
}

pub async fn delete_order(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = AdminOrdersView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    match view
        .delete_order(
            &ctx.session,
            &TerminalPrompt,
            &OrderId::new(id),
        )
        .await?
    {
        Some(message) => println!("{message}"),
        None => println!("Aborted."),
    }
    Ok(())
}

pub async fn manage_cancellation(
    ctx: &Context,
    id: &str,
    action: CancellationAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = AdminDashboardView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    match view
        .manage_cancellation(
            &ctx.session,
            &TerminalPrompt,
            &OrderId::new(id),
            action,
        )
        .await?
    {
        Some(message) => println!("{message}"),
        None => println!("Aborted."),
    }
    Ok(())
}

pub async fn list_users(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = UserListView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    let users = view.state.into_result()?;

    for user in &users {
        let mut tags = Vec::new();
        if user.is_admin {
            tags.push("admin");
        }
        if !user.is_verified {
            tags.push("unverified");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", tags.join(", "))
        };
        println!("{}  {} <{}>{tags}", user.id, user.name, user.email);
    }
    Ok(())
}

pub async fn delete_user(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = UserListView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    match view
        .delete_user(&ctx.session, &TerminalPrompt, &UserId::new(id))
        .await?
    {
        Some(message) => println!("{message}"),
        None => println!("Aborted."),
    }
    Ok(())
}
