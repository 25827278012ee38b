//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use modulo_cache::FileStore;
use modulo_commerce::cart::CartStore;
use modulo_commerce::catalog::Catalog;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => {
                    output.debug(&format!("Using config: {}", path.display()));
                    CliConfig::load(&path.to_string_lossy())?
                }
                None => CliConfig::default(),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Directory the cart is persisted in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let backend = FileStore::open(dir.clone())
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        let logger = self.config.log.logger(self.output.is_verbose())?;

        self.output.debug(&format!("Cart storage: {}", dir.display()));

        Ok(CartStore::open_with(
            backend,
            Catalog::standard(),
            self.config.cart.clone(),
            logger,
        ))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
