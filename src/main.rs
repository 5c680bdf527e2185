use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vendor_admin::clients::HttpClient;
use vendor_admin::config::Settings;
use vendor_admin::forms::{ProductForm, ShopForm};
use vendor_admin::models::Vendor;
use vendor_admin::services::{ApiService, Outcome, ScreenView, Tab, VendorAdminScreen};
use vendor_admin::views::{
    render_field_errors, render_notifications, render_product_dialog, render_screen,
};
use vendor_admin::Error;

/// Manage a marketplace shop from the terminal.
#[derive(Parser)]
#[command(name = "vendor-admin", version, about = "Vendor dashboard for the marketplace")]
struct Cli {
    /// Configuration file (yaml, toml or json)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Structured JSON logs on stderr
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sales metrics and shop details
    Overview,

    /// Product catalog
    Products {
        #[command(subcommand)]
        action: Option<ProductCommands>,
    },

    /// Incoming orders
    Orders {
        #[command(subcommand)]
        action: Option<OrderCommands>,
    },

    /// Shop status and details
    Shop {
        #[command(subcommand)]
        action: Option<ShopCommands>,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    List,
    Add(ProductArgs),
    /// Edit a product; unspecified fields keep their current value
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ProductArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// Preparation time in minutes
    #[arg(long)]
    prep_time: Option<String>,
    #[arg(long, conflicts_with = "unavailable")]
    available: bool,
    #[arg(long)]
    unavailable: bool,
}

#[derive(Subcommand)]
enum OrderCommands {
    List,
    /// Move an order to its next status
    Advance { id: i64 },
    /// Cancel a pending order
    Cancel { id: i64 },
}

#[derive(Subcommand)]
enum ShopCommands {
    Show,
    Open,
    Close,
    /// Update shop details; unspecified fields keep their current value
    Update(ShopArgs),
}

#[derive(Args)]
struct ShopArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    delivery_time: Option<String>,
}

impl ProductArgs {
    fn apply(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(prep_time) = self.prep_time {
            form.prep_time_minutes = prep_time;
        }
        if self.available {
            form.is_available = true;
        }
        if self.unavailable {
            form.is_available = false;
        }
    }
}

impl ShopArgs {
    fn apply(self, form: &mut ShopForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(location) = self.location {
            form.location = location;
        }
        if let Some(delivery_time) = self.delivery_time {
            form.delivery_time = delivery_time;
        }
    }
}

type Screen = VendorAdminScreen<ApiService>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    init_tracing(level, cli.json || settings.logging.json);
    settings.log_summary();

    let client = Arc::new(HttpClient::new(&settings.api)?);
    debug!(base_url = client.base_url(), "Connecting to marketplace");
    let mut screen = VendorAdminScreen::new(ApiService::new(client));

    let view = screen.load().await?;
    let vendor = match &view {
        ScreenView::NoShop { .. } => {
            println!("{}", render_screen(&view, Tab::Overview));
            return Ok(ExitCode::SUCCESS);
        }
        ScreenView::Dashboard(dashboard) => dashboard.vendor.clone(),
    };

    let command = cli.command.unwrap_or(Commands::Overview);
    let (tab, outcome) = match run(&mut screen, &vendor, command).await {
        Ok(result) => result,
        Err(Error::Validation(errors)) => {
            eprintln!("Please fix the following:\n{}", render_field_errors(&errors));
            if let Some(dialog) = screen.product_dialog() {
                eprintln!("\n{}", render_product_dialog(dialog));
            }
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    let notifications = screen.drain_notifications();
    if !notifications.is_empty() {
        println!("{}\n", render_notifications(&notifications));
    }

    let view = screen.load().await?;
    println!("{}", render_screen(&view, tab));

    Ok(match outcome {
        Outcome::Applied => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}

async fn run(
    screen: &mut Screen,
    vendor: &Vendor,
    command: Commands,
) -> vendor_admin::Result<(Tab, Outcome)> {
    let applied = |tab| (tab, Outcome::Applied);

    match command {
        Commands::Overview => Ok(applied(Tab::Overview)),

        Commands::Products { action } => match action.unwrap_or(ProductCommands::List) {
            ProductCommands::List => Ok(applied(Tab::Products)),
            ProductCommands::Add(fields) => {
                fields.apply(&mut screen.open_add_product().form);
                Ok((Tab::Products, screen.submit_product_dialog().await?))
            }
            ProductCommands::Edit { id, fields } => {
                fields.apply(&mut screen.open_edit_product(id)?.form);
                Ok((Tab::Products, screen.submit_product_dialog().await?))
            }
            ProductCommands::Delete { id } => Ok((Tab::Products, screen.delete_product(id).await)),
        },

        Commands::Orders { action } => match action.unwrap_or(OrderCommands::List) {
            OrderCommands::List => Ok(applied(Tab::Orders)),
            OrderCommands::Advance { id } => Ok((Tab::Orders, screen.advance_order(id).await?)),
            OrderCommands::Cancel { id } => Ok((Tab::Orders, screen.cancel_order(id).await?)),
        },

        Commands::Shop { action } => match action.unwrap_or(ShopCommands::Show) {
            ShopCommands::Show => Ok(applied(Tab::Settings)),
            ShopCommands::Open => Ok((Tab::Settings, screen.toggle_shop_open(true).await)),
            ShopCommands::Close => Ok((Tab::Settings, screen.toggle_shop_open(false).await)),
            ShopCommands::Update(fields) => {
                let mut form = ShopForm::from_vendor(vendor);
                fields.apply(&mut form);
                Ok((Tab::Settings, screen.save_shop(&form).await?))
            }
        },
    }
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
