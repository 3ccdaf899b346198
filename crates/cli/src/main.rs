//! Cycle Bazaar CLI - browse the catalog, manage the cart, track orders.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! cycle-bazaar browse --keyword hero --page 2
//!
//! # Log in and add to the cart
//! cycle-bazaar login -e rider@example.com -p secret
//! cycle-bazaar cart add 66f0a1 --quantity 2
//!
//! # Check out with cash on delivery
//! cycle-bazaar checkout --address "12 Canal Road" --city Pune \
//!     --postal-code 411001 --country India --method cod
//!
//! # Admin: move an order along
//! cycle-bazaar order 66f0b2 status "Out for Delivery" --admin
//! ```
//!
//! Configuration comes from the environment (or a `.env` file):
//! `CYCLE_BAZAAR_API_URL` for the API base and the optional
//! `CYCLE_BAZAAR_STORAGE_PATH` for the session file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use cycle_bazaar_admin::views::AddCycleForm;
use cycle_bazaar_core::{CancellationAction, PaymentMethod};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "cycle-bazaar")]
#[command(author, version, about = "Cycle Bazaar terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cycles, with optional search and paging
    Browse {
        /// Search brands and models
        #[arg(short, long)]
        keyword: Option<String>,

        /// Page number (1-indexed)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one cycle
    Show { id: String },
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout {
        #[arg(long)]
        address: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        postal_code: String,

        #[arg(long)]
        country: String,

        /// `stripe` or `cod`
        #[arg(long, default_value = "cod")]
        method: String,
    },
    /// List your orders
    Orders,
    /// Show or act on one order
    Order {
        id: String,

        /// Use the admin controls (status, cancellation verdicts)
        #[arg(long)]
        admin: bool,

        #[command(subcommand)]
        action: Option<OrderCmd>,
    },
    /// Show your wishlist
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },
    /// Admin catalog and account management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a cycle
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a cycle's line
    Remove { id: String },
}

#[derive(Subcommand)]
enum OrderCmd {
    /// Ask to cancel the order
    Cancel {
        #[arg(long)]
        reason: String,
    },
    /// Move the order to a new status (admin)
    Status { status: String },
    /// Record a cash-on-delivery payment (admin)
    MarkPaid,
    /// Decide a pending cancellation request (admin)
    Manage {
        /// `approve` or `reject`
        verdict: String,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add or remove a cycle
    Toggle { id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a cycle
    AddCycle {
        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        price: String,

        #[arg(long)]
        image_url: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "0")]
        stock: String,
    },
    /// Update a cycle's price or stock
    EditCycle {
        id: String,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        stock: Option<String>,
    },
    /// Delete a cycle
    DeleteCycle { id: String },
    /// List all orders
    Orders,
    /// Decide a cancellation request from the dashboard queue
    ManageCancellation {
        id: String,

        /// `approve` or `reject`
        verdict: String,
    },
    /// Delete an order
    DeleteOrder { id: String },
    /// List all accounts
    Users,
    /// Delete an account
    DeleteUser { id: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::from_env()?;

    match cli.command {
        Commands::Browse { keyword, page } => {
            commands::catalog::browse(&ctx, keyword.as_deref(), page).await?;
        }
        Commands::Show { id } => commands::catalog::show(&ctx, &id).await?,
        Commands::Login { email, password } => {
            commands::auth::login(&mut ctx, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&ctx, &name, &email, &password).await?,
        Commands::Logout => commands::auth::logout(&mut ctx)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&mut ctx).await?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(&mut ctx, &id, quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id).await?,
        },
        Commands::Checkout {
            address,
            city,
            postal_code,
            country,
            method,
        } => {
            let method = parse_method(&method)?;
            commands::cart::checkout(&mut ctx, &address, &city, &postal_code, &country, method)
                .await?;
        }
        Commands::Orders => commands::orders::my_orders(&ctx).await?,
        Commands::Order { id, admin, action } => match action {
            None => commands::orders::show(&ctx, &id, admin).await?,
            Some(OrderCmd::Cancel { reason }) => {
                commands::orders::cancel(&ctx, &id, &reason).await?;
            }
            Some(OrderCmd::Status { status }) => {
                commands::orders::set_status(&ctx, &id, &status).await?;
            }
            Some(OrderCmd::MarkPaid) => commands::orders::mark_paid(&ctx, &id).await?,
            Some(OrderCmd::Manage { verdict }) => {
                commands::orders::manage(&ctx, &id, parse_verdict(&verdict)?).await?;
            }
        },
        Commands::Wishlist { action } => match action {
            None => commands::catalog::wishlist(&ctx).await?,
            Some(WishlistAction::Toggle { id }) => {
                commands::catalog::toggle_wishlist(&mut ctx, &id).await?;
            }
        },
        Commands::Admin { action } => run_admin(&ctx, action).await?,
    }
    Ok(())
}

async fn run_admin(ctx: &Context, action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AdminAction::AddCycle {
            brand,
            model,
            price,
            image_url,
            description,
            stock,
        } => {
            let form = AddCycleForm {
                brand,
                model,
                price,
                image_url,
                description,
                stock,
            };
            commands::admin::add_cycle(ctx, form).await?;
        }
        AdminAction::EditCycle { id, price, stock } => {
            commands::admin::edit_cycle(ctx, &id, |form| {
                if let Some(price) = price {
                    form.price = price;
                }
                if let Some(stock) = stock {
                    form.stock = stock;
                }
            })
            .await?;
        }
        AdminAction::DeleteCycle { id } => commands::admin::delete_cycle(ctx, &id).await?,
        AdminAction::Orders => commands::admin::list_orders(ctx).await?,
        AdminAction::ManageCancellation { id, verdict } => {
            commands::admin::manage_cancellation(ctx, &id, parse_verdict(&verdict)?).await?;
        }
        AdminAction::DeleteOrder { id } => commands::admin::delete_order(ctx, &id).await?,
        AdminAction::Users => commands::admin::list_users(ctx).await?,
        AdminAction::DeleteUser { id } => commands::admin::delete_user(ctx, &id).await?,
    }
    Ok(())
}

fn parse_method(raw: &str) -> Result<PaymentMethod, Box<dyn std::error::Error>> {
    match raw.to_ascii_lowercase().as_str() {
        "stripe" => Ok(PaymentMethod::Stripe),
        "cod" => Ok(PaymentMethod::Cod),
        other => Err(format!("unknown payment method: {other} (use stripe or cod)").into()),
    }
}

fn parse_verdict(raw: &str) -> Result<CancellationAction, Box<dyn std::error::Error>> {
    match raw.to_ascii_lowercase().as_str() {
        "approve" => Ok(CancellationAction::Approve),
        "reject" => Ok(CancellationAction::Reject),
        other => Err(format!("unknown verdict: {other} (use approve or reject)").into()),
    }
}
