//! Account commands.

use cycle_bazaar_storefront::views::{LoginForm, RegisterForm};

use crate::commands::Context;

pub async fn login(
    ctx: &mut Context,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = LoginForm {
        email: email.to_owned(),
        password: password.to_owned(),
    };
    let identity = form
        .submit(&ctx.api, &mut ctx.session, &mut ctx.cart)
        .await?;
    println!("Logged in as {} <{}>", identity.name, identity.email);
    if identity.is_admin {
        println!("(admin)");
    }
    Ok(())
}

pub async fn register(
    ctx: &Context,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = RegisterForm {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: password.to_owned(),
    };
    let message = form.submit(&ctx.api).await?;
    println!("{message}");
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.session.logout()?;
    ctx.cart.clear();
    println!("Logged out.");
    Ok(())
}
