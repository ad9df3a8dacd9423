//! Food delivery command-line client.

mod app;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use api_types::PaymentMode;
use app::{AppState, CliResult};
use clap::{Parser, Subcommand};
use client_config_and_utils::{init_logging, Config, Paths};
use commands::{
    AdminCommand, CartCommand, ComplaintsCommand, ConfigCommand, DeliveryCommand, OrdersCommand,
    RestaurantCommand, SignupArgs, SupportCommand,
};

/// Food delivery command-line interface.
#[derive(Parser)]
#[command(name = "food-delivery")]
#[command(about = "Order food, run a restaurant, deliver, support and administer the platform")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level.
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Base directory for runtime files (config, sessions, logs). Defaults to ~/.food-delivery
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        /// Read from FOOD_DELIVERY_PASSWORD or prompted when omitted
        #[arg(short, long, env = "FOOD_DELIVERY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Signup(SignupArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List restaurants delivering to a pin code (defaults to yours)
    Restaurants {
        #[arg(long)]
        pin_code: Option<String>,
    },
    /// Show a restaurant's menu
    Menu { restaurant_id: i64 },
    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Place an order from the cart
    Checkout {
        /// cash, card or upi
        #[arg(long)]
        payment_mode: PaymentMode,
        #[arg(long)]
        offer_id: Option<i64>,
    },
    /// Order history and actions on past orders
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Raise or list complaints
    #[command(subcommand)]
    Complaints(ComplaintsCommand),
    /// Restaurant owner tools
    #[command(subcommand)]
    Restaurant(RestaurantCommand),
    /// Delivery partner tools
    #[command(subcommand)]
    Delivery(DeliveryCommand),
    /// Customer care tools
    #[command(subcommand)]
    Support(SupportCommand),
    /// Platform administration
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Show or initialize the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level, &paths);

    if let Commands::Config(command) = cli.command {
        return commands::config::run(command, &paths, &config);
    }

    let state = AppState::init(&paths, config, cli.format)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&state, &email, password).await,
        Commands::Signup(args) => commands::auth::signup(&state, args).await,
        Commands::Logout => commands::auth::logout(&state),
        Commands::Whoami => commands::auth::whoami(&state).await,
        Commands::Restaurants { pin_code } => commands::customer::restaurants(&state, pin_code).await,
        Commands::Menu { restaurant_id } => commands::customer::menu(&state, restaurant_id).await,
        Commands::Cart(command) => commands::customer::cart(&state, command).await,
        Commands::Checkout {
            payment_mode,
            offer_id,
        } => commands::customer::checkout(&state, payment_mode, offer_id).await,
        Commands::Orders(command) => commands::customer::orders(&state, command).await,
        Commands::Complaints(command) => commands::customer::complaints(&state, command).await,
        Commands::Restaurant(command) => commands::restaurant::run(&state, command).await,
        Commands::Delivery(command) => commands::delivery::run(&state, command).await,
        Commands::Support(command) => commands::support::run(&state, command).await,
        Commands::Admin(command) => commands::admin::run(&state, command).await,
        Commands::Config(_) => Ok(()),
    }
}
