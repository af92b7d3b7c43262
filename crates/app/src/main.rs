//! Dink Storefront CLI

use std::{path::PathBuf, process};

use clap::{Args, Parser, Subcommand};
use dink::{
    cart::CartStore,
    orders::OrderStatus,
    prices::format_price,
};
use dink_app::{
    checkout::{self, CheckoutForm, CheckoutOutcome, PaymentConfirmation},
    context::AppContext,
    domain::{
        catalog::ProductFilter,
        discounts::{DiscountKind, NewDiscount},
        messages::NewMessage,
    },
    storage::JsonFileStorage,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dink", about = "Dink storefront CLI", long_about = None)]
struct Cli {
    /// Backend API base URL
    #[arg(long, env = "DINK_API_BASE_URL", default_value = "http://localhost:3000/api")]
    api_base_url: String,

    /// Path of the local cart file
    #[arg(long, env = "DINK_CART_PATH", default_value = "dink_cart.json")]
    cart_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(ProductsCommand),
    /// Inspect and edit the local cart
    Cart(CartCommand),
    /// Submit the cart as an order and initialise payment
    Checkout(CheckoutArgs),
    /// Check whether a redirected payment has settled
    ConfirmPayment(ConfirmPaymentArgs),
    /// Send a contact-form message
    Contact(ContactArgs),
    /// Back-office operations
    Admin(AdminCommand),
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products
    List {
        /// Filter by category; `all` lists everything
        #[arg(long)]
        category: Option<String>,

        /// Filter by gender; `all` lists everything
        #[arg(long)]
        gender: Option<String>,
    },
    /// Show one product
    Show { id: u64 },
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product to the cart
    Add {
        product_id: u64,

        /// Units to add; defaults to the store minimum
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Print the cart contents
    Show,
    /// Set the quantity for a product; zero removes it
    SetQty { product_id: u64, quantity: u32 },
    /// Remove a product from the cart
    Remove { product_id: u64 },
    /// Empty the cart
    Clear,
    /// Validate a coupon code against the cart
    Coupon { code: String },
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    delivery_preferences: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long)]
    coupon: Option<String>,
}

#[derive(Debug, Args)]
struct ConfirmPaymentArgs {
    /// Transaction reference returned by the gateway redirect
    #[arg(long)]
    tx_ref: String,
}

#[derive(Debug, Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    subject: String,

    #[arg(long)]
    message: String,
}

#[derive(Debug, Args)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    Orders(OrdersCommand),
    Discounts(DiscountsCommand),
    /// List inbox messages
    Messages {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Dashboard counters and revenue
    Summary,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List all orders
    List,
    /// Show one order
    Show { id: u64 },
    /// Move an order to a new status
    SetStatus { id: u64, status: OrderStatus },
}

#[derive(Debug, Args)]
struct DiscountsCommand {
    #[command(subcommand)]
    command: DiscountsSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountsSubcommand {
    /// List all coupons
    List,
    /// Create a coupon
    Create(CreateDiscountArgs),
    /// Enable a coupon
    Enable { id: u64 },
    /// Disable a coupon
    Disable { id: u64 },
    /// Delete a coupon
    Delete { id: u64 },
}

#[derive(Debug, Args)]
struct CreateDiscountArgs {
    #[arg(long)]
    code: String,

    /// `percent` or `fixed`
    #[arg(long, value_parser = parse_discount_kind)]
    kind: DiscountKind,

    /// Percent points, or a fixed amount in minor units
    #[arg(long)]
    value: i64,

    /// Minimum cart subtotal in minor units
    #[arg(long)]
    min_subtotal_cents: Option<i64>,

    /// Minimum cart quantity
    #[arg(long)]
    min_qty: Option<u32>,

    /// Redemption cap
    #[arg(long)]
    max_uses: Option<u32>,
}

fn parse_discount_kind(value: &str) -> Result<DiscountKind, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "percent" => Ok(DiscountKind::Percent),
        "fixed" => Ok(DiscountKind::Fixed),
        other => Err(format!("unknown discount kind '{other}', expected percent or fixed")),
    }
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let context = AppContext::from_base_url(&cli.api_base_url);
    let mut cart = CartStore::restore(JsonFileStorage::new(cli.cart_path));

    match cli.command {
        Commands::Products(ProductsCommand { command }) => match command {
            ProductsSubcommand::List { category, gender } => {
                list_products(&context, category, gender).await
            }
            ProductsSubcommand::Show { id } => show_product(&context, id).await,
        },
        Commands::Cart(CartCommand { command }) => match command {
            CartSubcommand::Add {
                product_id,
                quantity,
            } => add_to_cart(&context, &mut cart, product_id, quantity).await,
            CartSubcommand::Show => {
                print_cart(&cart);

                Ok(())
            }
            CartSubcommand::SetQty {
                product_id,
                quantity,
            } => {
                cart.update_quantity(product_id, quantity);
                print_cart(&cart);

                Ok(())
            }
            CartSubcommand::Remove { product_id } => {
                cart.remove_item(product_id);
                print_cart(&cart);

                Ok(())
            }
            CartSubcommand::Clear => {
                cart.clear();
                println!("cart cleared");

                Ok(())
            }
            CartSubcommand::Coupon { code } => quote_coupon(&context, &cart, &code).await,
        },
        Commands::Checkout(args) => submit_checkout(&context, &mut cart, args).await,
        Commands::ConfirmPayment(args) => confirm_payment(&context, &mut cart, &args.tx_ref).await,
        Commands::Contact(args) => send_message(&context, args).await,
        Commands::Admin(AdminCommand { command }) => match command {
            AdminSubcommand::Orders(OrdersCommand { command }) => match command {
                OrdersSubcommand::List => list_orders(&context).await,
                OrdersSubcommand::Show { id } => show_order(&context, id).await,
                OrdersSubcommand::SetStatus { id, status } => {
                    set_order_status(&context, id, status).await
                }
            },
            AdminSubcommand::Discounts(DiscountsCommand { command }) => match command {
                DiscountsSubcommand::List => list_discounts(&context).await,
                DiscountsSubcommand::Create(args) => create_discount(&context, args).await,
                DiscountsSubcommand::Enable { id } => set_discount_active(&context, id, true).await,
                DiscountsSubcommand::Disable { id } => {
                    set_discount_active(&context, id, false).await
                }
                DiscountsSubcommand::Delete { id } => delete_discount(&context, id).await,
            },
            AdminSubcommand::Messages { limit } => list_messages(&context, limit).await,
            AdminSubcommand::Summary => show_summary(&context).await,
        },
    }
}

async fn list_products(
    context: &AppContext,
    category: Option<String>,
    gender: Option<String>,
) -> Result<(), String> {
    let products = context
        .catalog
        .list_products(ProductFilter { category, gender })
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    for product in products {
        let stock = if product.is_out_of_stock() {
            "out of stock".to_owned()
        } else {
            format!("{} in stock", product.stock)
        };

        println!(
            "{:>6}  {}  {}  ({stock})",
            product.id,
            product.name,
            format_price(product.price),
        );
    }

    Ok(())
}

async fn show_product(context: &AppContext, id: u64) -> Result<(), String> {
    let product = context
        .catalog
        .get_product(id)
        .await
        .map_err(|error| format!("failed to fetch product {id}: {error}"))?
        .ok_or_else(|| format!("product {id} not found"))?;

    println!("id: {}", product.id);
    println!("name: {}", product.name);
    println!("price: {}", format_price(product.price));
    println!("stock: {}", product.stock);

    if !product.category.is_empty() {
        println!("category: {}", product.category);
    }

    if !product.gender.is_empty() {
        println!("gender: {}", product.gender);
    }

    if !product.description.is_empty() {
        println!("description: {}", product.description);
    }

    Ok(())
}

async fn add_to_cart(
    context: &AppContext,
    cart: &mut CartStore<JsonFileStorage>,
    product_id: u64,
    quantity: Option<u32>,
) -> Result<(), String> {
    let product = context
        .catalog
        .get_product(product_id)
        .await
        .map_err(|error| format!("failed to fetch product {product_id}: {error}"))?
        .ok_or_else(|| format!("product {product_id} not found"))?;

    if product.is_out_of_stock() {
        return Err(format!("{} is out of stock", product.name));
    }

    cart.add_item(&product.snapshot(), quantity);
    print_cart(cart);

    Ok(())
}

fn print_cart(cart: &CartStore<JsonFileStorage>) {
    if cart.is_empty() {
        println!("cart is empty");

        return;
    }

    for line in cart.lines() {
        println!(
            "{:>6}  {}  {} x {} = {}",
            line.product_id,
            line.name,
            line.quantity,
            format_price(line.price),
            format_price(line.line_total()),
        );
    }

    println!("items: {}", cart.item_count());
    println!("total: {}", format_price(cart.total()));
}

async fn quote_coupon(
    context: &AppContext,
    cart: &CartStore<JsonFileStorage>,
    code: &str,
) -> Result<(), String> {
    let quote = checkout::quote_coupon(cart, context.discounts.as_ref(), code)
        .await
        .map_err(|error| format!("coupon not applied: {error}"))?;

    println!("discount: -{}", format_price(rust_decimal::Decimal::new(quote.discount_cents, 2)));
    println!("grand total: {}", format_price(quote.grand_total));

    Ok(())
}

async fn submit_checkout(
    context: &AppContext,
    cart: &mut CartStore<JsonFileStorage>,
    args: CheckoutArgs,
) -> Result<(), String> {
    let outcome = checkout::submit(
        cart,
        context.orders.as_ref(),
        context.payments.as_ref(),
        CheckoutForm {
            customer_name: args.name,
            customer_email: args.email,
            customer_phone: args.phone,
            address: args.address,
            delivery_preferences: args.delivery_preferences,
            notes: args.notes,
            coupon_code: args.coupon,
        },
    )
    .await
    .map_err(|error| format!("checkout failed: {error}"))?;

    match outcome {
        CheckoutOutcome::Paid {
            order,
            customer_receipt_token,
        } => {
            println!("order {} paid", order.order_number);
            println!(
                "receipt: {}",
                context.payments.receipt_url(&customer_receipt_token, false)
            );
        }
        CheckoutOutcome::RedirectToGateway { order, form } => {
            println!("order {} created, complete payment at:", order.order_number);
            println!("{}", form.action_url);

            for (key, value) in form.sorted_fields() {
                println!("  {key}: {value}");
            }

            println!("then run: dink confirm-payment --tx-ref <tx_ref>");
        }
    }

    Ok(())
}

async fn confirm_payment(
    context: &AppContext,
    cart: &mut CartStore<JsonFileStorage>,
    tx_ref: &str,
) -> Result<(), String> {
    let confirmation = checkout::confirm_payment(cart, context.payments.as_ref(), tx_ref)
        .await
        .map_err(|error| format!("failed to verify payment: {error}"))?;

    match confirmation {
        PaymentConfirmation::Confirmed { receipt_url } => {
            println!("payment confirmed");
            println!("receipt: {receipt_url}");
        }
        PaymentConfirmation::NotSettled => {
            println!("payment has not settled; the cart is unchanged");
        }
    }

    Ok(())
}

async fn send_message(context: &AppContext, args: ContactArgs) -> Result<(), String> {
    let message = context
        .messages
        .send(NewMessage {
            name: args.name,
            email: args.email,
            subject: args.subject,
            message: args.message,
        })
        .await
        .map_err(|error| format!("failed to send message: {error}"))?;

    println!("message {} sent", message.id);

    Ok(())
}

async fn list_orders(context: &AppContext) -> Result<(), String> {
    let orders = context
        .orders
        .list_orders()
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    for order in orders {
        println!(
            "{:>6}  {}  {}  {}  {}",
            order.id,
            order.order_number,
            order.customer_name,
            order.status.label(),
            format_price(order.total()),
        );
    }

    Ok(())
}

async fn show_order(context: &AppContext, id: u64) -> Result<(), String> {
    let order = context
        .orders
        .get_order(id)
        .await
        .map_err(|error| format!("failed to fetch order {id}: {error}"))?;

    println!("id: {}", order.id);
    println!("number: {}", order.order_number);
    println!("customer: {} <{}>", order.customer_name, order.customer_email);
    println!("phone: {}", order.customer_phone);
    println!("address: {}", order.address);
    println!("status: {}", order.status.label());
    println!("total: {}", format_price(order.total()));
    println!("created: {}", order.created_at);
    println!("updated: {}", order.updated_at);

    let next: Vec<&str> = order
        .status
        .allowed_transitions()
        .iter()
        .map(|status| status.as_str())
        .collect();

    if next.is_empty() {
        println!("next: none (terminal)");
    } else {
        println!("next: {}", next.join(", "));
    }

    Ok(())
}

async fn set_order_status(
    context: &AppContext,
    id: u64,
    status: OrderStatus,
) -> Result<(), String> {
    let order = context
        .orders
        .get_order(id)
        .await
        .map_err(|error| format!("failed to fetch order {id}: {error}"))?;

    order
        .status
        .validate_transition(status)
        .map_err(|error| error.to_string())?;

    let updated = context
        .orders
        .update_status(id, status)
        .await
        .map_err(|error| format!("failed to update order {id}: {error}"))?;

    println!("order {} is now {}", updated.order_number, updated.status.label());

    Ok(())
}

async fn list_discounts(context: &AppContext) -> Result<(), String> {
    let discounts = context
        .discounts
        .list()
        .await
        .map_err(|error| format!("failed to list discounts: {error}"))?;

    for discount in discounts {
        let state = if discount.active { "active" } else { "inactive" };

        println!(
            "{:>6}  {}  {} {}  used {}  ({state})",
            discount.id, discount.code, discount.kind, discount.value, discount.used_count,
        );
    }

    Ok(())
}

async fn create_discount(context: &AppContext, args: CreateDiscountArgs) -> Result<(), String> {
    let discount = context
        .discounts
        .create(NewDiscount {
            code: args.code,
            kind: args.kind,
            value: args.value,
            min_subtotal_cents: args.min_subtotal_cents,
            min_qty: args.min_qty,
            max_uses: args.max_uses,
            starts_at: None,
            ends_at: None,
        })
        .await
        .map_err(|error| format!("failed to create discount: {error}"))?;

    println!("discount {} created with id {}", discount.code, discount.id);

    Ok(())
}

async fn set_discount_active(context: &AppContext, id: u64, active: bool) -> Result<(), String> {
    let discount = context
        .discounts
        .set_active(id, active)
        .await
        .map_err(|error| format!("failed to update discount {id}: {error}"))?;

    let state = if discount.active { "active" } else { "inactive" };
    println!("discount {} is now {state}", discount.code);

    Ok(())
}

async fn delete_discount(context: &AppContext, id: u64) -> Result<(), String> {
    context
        .discounts
        .delete(id)
        .await
        .map_err(|error| format!("failed to delete discount {id}: {error}"))?;

    println!("discount {id} deleted");

    Ok(())
}

async fn list_messages(context: &AppContext, limit: Option<u32>) -> Result<(), String> {
    let messages = context
        .messages
        .list(limit)
        .await
        .map_err(|error| format!("failed to list messages: {error}"))?;

    for message in messages {
        let marker = if message.read { " " } else { "*" };

        println!(
            "{marker}{:>5}  {}  {} <{}>  {}",
            message.id, message.created_at, message.name, message.email, message.subject,
        );
    }

    Ok(())
}

async fn show_summary(context: &AppContext) -> Result<(), String> {
    let summary = context
        .orders
        .summary()
        .await
        .map_err(|error| format!("failed to fetch summary: {error}"))?;

    println!("products: {}", summary.products);
    println!("bundles: {}", summary.bundles);
    println!("orders: {}", summary.orders);
    println!("leads: {}", summary.leads);
    println!("discounts: {}", summary.discounts);
    println!("revenue: {}", format_price(summary.revenue));

    Ok(())
}
