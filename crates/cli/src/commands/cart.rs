//! Cart and checkout commands.

use cycle_bazaar_client::types::ShippingAddress;
use cycle_bazaar_core::{CycleId, PaymentMethod};
use cycle_bazaar_storefront::views::CartPageView;
use cycle_bazaar_storefront::{CheckoutSequencer, CheckoutStep};

use crate::commands::Context;

pub async fn show(ctx: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.sync_cart().await;
    let page = CartPageView::from_store(&ctx.cart);

    if page.lines.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }
    for line in &page.lines {
        println!(
            "{}  {} x{}  ₹{}",
            line.cycle_id, line.name, line.quantity, line.line_total
        );
    }
    println!("subtotal: ₹{}", page.subtotal);
    Ok(())
}

pub async fn add(
    ctx: &mut Context,
    id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.sync_cart().await;
    let identity = ctx.session.identity().cloned();
    ctx.cart
        .add_to_cart(identity.as_ref(), &CycleId::new(id), quantity)
        .await?;
    println!("Added to cart ({} lines).", ctx.cart.items().len());
    Ok(())
}

pub async fn remove(ctx: &mut Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    ctx.sync_cart().await;
    let identity = ctx.session.identity().cloned();
    ctx.cart
        .remove_from_cart(identity.as_ref(), &CycleId::new(id))
        .await?;
    println!("Removed from cart ({} lines).", ctx.cart.items().len());
    Ok(())
}

/// Walk the whole checkout in one shot: shipping, payment, review, place.
pub async fn checkout(
    ctx: &mut Context,
    address: &str,
    city: &str,
    postal_code: &str,
    country: &str,
    method: PaymentMethod,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.sync_cart().await;

    let mut flow = CheckoutSequencer::new(ctx.api.clone());
    flow.submit_shipping(
        &mut ctx.cart,
        ShippingAddress {
            address: address.to_owned(),
            city: city.to_owned(),
            postal_code: postal_code.to_owned(),
            country: country.to_owned(),
        },
    )?;
    flow.submit_payment(&mut ctx.cart, method)?;

    let totals = CheckoutSequencer::totals(&ctx.cart);
    println!("items: ₹{}", totals.items_price);
    println!("shipping: ₹{}", totals.shipping_price);
    println!("tax: ₹{}", totals.tax_price);
    println!("total: ₹{}", totals.total_price);

    let order = flow.place_order(&ctx.session, &mut ctx.cart).await?;
    if let CheckoutStep::Placed(id) = &flow.step {
        println!("Order placed: {id}");
    }
    if order.payment_method == PaymentMethod::Stripe {
        println!("Pay online from the order screen: order {}", order.id);
    }
    Ok(())
}
