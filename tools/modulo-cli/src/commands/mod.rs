//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod design;

use clap::{ArgGroup, Args, Subcommand};

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Module id (A-E).
    pub module: String,

    /// Front finish id.
    pub front: String,

    /// Sides finish id.
    pub sides: String,

    /// Quantity to price.
    #[arg(short, long, default_value = "1")]
    pub qty: u32,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Module id (A-E).
    pub module: String,

    /// Front finish id.
    pub front: String,

    /// Sides finish id.
    pub sides: String,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub qty: u32,

    /// Group tag, e.g. a design id.
    #[arg(short, long)]
    pub group: Option<String>,
}

/// Arguments for the qty command.
#[derive(Args)]
#[command(group(ArgGroup::new("change").required(true).args(["delta", "set"])))]
pub struct QtyArgs {
    /// Line item id.
    pub id: String,

    /// Shift the quantity by this amount.
    #[arg(short, long, allow_hyphen_values = true)]
    pub delta: Option<i64>,

    /// Set the quantity to this value.
    #[arg(short, long, allow_hyphen_values = true)]
    pub set: Option<i64>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line item id.
    pub id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Group items by design tag.
    #[arg(short, long)]
    pub grouped: bool,
}

/// Arguments for the design command.
#[derive(Args)]
pub struct DesignArgs {
    /// Path to a design proposal JSON file.
    pub file: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Pay and empty the cart.
    #[arg(long)]
    pub pay: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
