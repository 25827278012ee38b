//! Modulo CLI - browse the catalog and manage a persisted cart.
//!
//! Commands:
//! - `modulo catalog` - List modules and finishes
//! - `modulo price` - Price a single configuration
//! - `modulo add` - Add a configuration to the cart
//! - `modulo qty` - Change a line item's quantity
//! - `modulo remove` - Remove a line item
//! - `modulo clear` - Empty the cart
//! - `modulo show` - Show cart contents
//! - `modulo design` - Add a generated design proposal
//! - `modulo checkout` - Review and pay
//! - `modulo config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, DesignArgs, PriceArgs, QtyArgs, RemoveArgs,
    ShowArgs,
};

/// Modulo CLI - configure modular furniture and manage your cart
#[derive(Parser)]
#[command(name = "modulo")]
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
    /// List modules and finishes
    Catalog,

    /// Price one module configuration
    Price(PriceArgs),

    /// Add a module configuration to the cart
    Add(AddArgs),

    /// Change a line item's quantity
    Qty(QtyArgs),

    /// Remove a line item
    Remove(RemoveArgs),

    /// Empty the cart
    Clear(ClearArgs),

    /// Show cart contents
    Show(ShowArgs),

    /// Add a design proposal from a JSON file
    Design(DesignArgs),

    /// Review the order and optionally pay
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog => commands::catalog::run(&ctx),
        Commands::Price(args) => commands::catalog::price(args, &ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Qty(args) => commands::cart::qty(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Show(args) => commands::cart::show(args, &ctx),
        Commands::Design(args) => commands::design::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
