//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &ctx.config.cart.storage_key);
    ctx.output.kv("ungrouped_label", &ctx.config.cart.ungrouped_label);

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.config.storage.dir);
    ctx.output
        .kv("resolved", &ctx.storage_dir().display().to_string());

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
