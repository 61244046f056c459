//! Helix CLI - Command line tool for the Helix storefront.
//!
//! Commands:
//! - `helix products` - Query the product catalog
//! - `helix profile` - Inspect and drive the visitor's personalization profile
//! - `helix page` - Render the catalog or a product detail page
//! - `helix api` - Send a request to the product endpoint

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{ApiArgs, PageArgs, ProductsArgs, ProfileArgs};

/// Helix CLI - Browse the catalog and personalization state
#[derive(Parser)]
#[command(name = "helix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Products(ProductsArgs),

    /// Inspect or change the personalization profile
    Profile(ProfileArgs),

    /// Render the catalog page or a product detail page
    Page(PageArgs),

    /// Send a request to the product endpoint
    Api(ApiArgs),
}

/// Logs go to stderr, filtered by `HELIX_LOG`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HELIX_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Profile(args) => commands::profile::run(args, &ctx).await,
        Commands::Page(args) => commands::page::run(args, &ctx).await,
        Commands::Api(args) => commands::api::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
