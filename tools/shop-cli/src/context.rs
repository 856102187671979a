//! CLI execution context.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context as _, Result};
use shop_client::{ApiConfig, ShopClient};
use shop_state::{CartStore, Notifier};

pub use crate::config::Overrides;
use crate::config::CliConfig;
use crate::notifier::TerminalNotifier;
use crate::output::Output;

/// Config file names, searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// The storefront as seen from one CLI invocation.
pub type Store = CartStore<ShopClient>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was read from.
    pub config_path: Option<PathBuf>,
    /// Command-line overrides.
    pub overrides: Overrides,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, overrides: Overrides, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            overrides,
            output,
            cwd,
        })
    }

    /// Resolved API settings.
    pub fn api_config(&self) -> Result<ApiConfig> {
        self.config
            .api_config(&self.overrides, |key| std::env::var(key).ok())
            .context("Shop API is not configured (see `shop config init`)")
    }

    /// API client plus the shared cart store, reporting to the terminal.
    pub fn store(&self) -> Result<Store> {
        let api = self.api_config()?;
        tracing::debug!(api_root = %api.api_root(), "connecting");
        let client = ShopClient::from_config(&api);
        let notifier: Rc<dyn Notifier> = Rc::new(TerminalNotifier::new(self.output.clone()));
        Ok(CartStore::new(Rc::new(client), notifier))
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

/// Find config file in directory tree.
fn find_config(start: &Path) -> Result<Option<(CliConfig, PathBuf)>> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                let path = candidate.to_string_lossy().to_string();
                return Ok(Some((CliConfig::load(&path)?, candidate)));
            }
        }

        if !current.pop() {
            return Ok(None);
        }
    }
}
