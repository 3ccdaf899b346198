//! Catalog browsing commands.

use cycle_bazaar_core::CycleId;
use cycle_bazaar_storefront::views::{CatalogView, CycleDetailView, WishlistView};

use crate::commands::Context;

pub async fn browse(
    ctx: &Context,
    keyword: Option<&str>,
    page: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = CatalogView::new(ctx.api.clone());
    view.load(keyword, page).await;
    let catalog = view.state.into_result()?;

    for cycle in &catalog.cycles {
        let stock = if cycle.in_stock() { "" } else { "  [out of stock]" };
        println!(
            "{}  {}  ₹{}{stock}",
            cycle.id,
            cycle.display_name(),
            cycle.price
        );
    }
    println!("page {} of {}", catalog.pager.page, catalog.pager.pages);
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = CycleDetailView::new(ctx.api.clone());
    view.load(&CycleId::new(id)).await;
    let flags = view.flags(ctx.session.identity());
    let cycle = view.state.into_result()?;

    println!("{}", cycle.display_name());
    println!("price: ₹{}", cycle.price);
    println!("stock: {}", cycle.stock);
    if !cycle.description.is_empty() {
        println!("{}", cycle.description);
    }
    if flags.in_wishlist {
        println!("(in your wishlist)");
    }
    Ok(())
}

pub async fn wishlist(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = WishlistView::new(ctx.api.clone());
    view.load(&ctx.session).await;
    let cycles = view.state.into_result()?;

    if cycles.is_empty() {
        println!("Your wishlist is empty.");
        return Ok(());
    }
    for cycle in &cycles {
        println!("{}  {}  ₹{}", cycle.id, cycle.display_name(), cycle.price);
    }
    Ok(())
}

pub async fn toggle_wishlist(
    ctx: &mut Context,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = CycleDetailView::new(ctx.api.clone());
    view.load(&CycleId::new(id)).await;
    let message = view.toggle_wishlist(&mut ctx.session).await?;
    println!("{message}");
    Ok(())
}
