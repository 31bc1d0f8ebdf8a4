//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod import;
pub mod output;
pub mod shipping_bill;
pub mod source;

use std::path::{Path, PathBuf};

use anyhow::Context;

use tradedoc_core::TradedocConfig;

/// `<config dir>/tradedoc/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tradedoc")
        .join("config.json")
}

/// Load the configuration from `--config`, else the default path if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TradedocConfig> {
    if let Some(path) = config_path {
        return TradedocConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path));
    }

    let path = default_config_path();
    if path.exists() {
        TradedocConfig::from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))
    } else {
        Ok(TradedocConfig::default())
    }
}
