//! Config command - inspect and edit the JSON configuration.
//!
//! Keys are dotted paths into the serialized [`TradedocConfig`], e.g.
//! `output.pretty_json` or `import.aliases.be_no`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use tradedoc_core::TradedocConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the built-in defaults to a configuration file
    Init(InitArgs),

    /// Print one value (e.g. "import.header_row")
    Get { key: String },

    /// Replace one value; VALUE is JSON, or taken as a plain string
    Set { key: String, value: String },

    /// Print where the configuration file lives
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Write here instead of the configuration path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                eprintln!("{} {} not found, using defaults", style("ℹ").blue(), path.display());
            }
            println!("{}", serde_json::to_string_pretty(&effective(&path)?)?);
        }
        ConfigCommand::Init(init) => write_defaults(init.output.unwrap_or(path), init.force)?,
        ConfigCommand::Get { key } => {
            let tree = effective(&path)?;
            let value = tree
                .pointer(&pointer(&key))
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => set_value(&path, &key, &value)?,
        ConfigCommand::Path => {
            let status = if path.exists() {
                style("exists").green()
            } else {
                style("not created (run 'tradedoc config init')").yellow()
            };
            println!("{} ({})", path.display(), status);
        }
    }

    Ok(())
}

/// Dotted key to JSON pointer: `a.b` becomes `/a/b`, the empty key the root.
fn pointer(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    key.split('.').map(|part| format!("/{}", part)).collect()
}

/// The configuration in effect at `path`, as a JSON tree.
fn effective(path: &Path) -> anyhow::Result<Value> {
    let config = if path.exists() {
        TradedocConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?
    } else {
        TradedocConfig::default()
    };
    Ok(serde_json::to_value(config)?)
}

fn write_defaults(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to replace it", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    TradedocConfig::default().save(&path)?;
    println!("{} Wrote default configuration to {}", style("✓").green(), path.display());
    Ok(())
}

/// Only existing keys can be replaced, and the result must still
/// deserialize as a [`TradedocConfig`].
fn set_value(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let (parent, leaf) = key.rsplit_once('.').unwrap_or(("", key));
    let value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut tree = effective(path)?;
    let slot = tree
        .pointer_mut(&pointer(parent))
        .and_then(Value::as_object_mut)
        .filter(|object| object.contains_key(leaf))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    slot.insert(leaf.to_string(), value.clone());

    let config: TradedocConfig = serde_json::from_value(tree)
        .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    config.save(path)?;

    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer() {
        assert_eq!(pointer("output.pretty_json"), "/output/pretty_json");
        assert_eq!(pointer("import"), "/import");
        assert_eq!(pointer(""), "");
    }

    #[test]
    fn test_set_value_rejects_unknown_and_mistyped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(set_value(&path, "output.colour", "true").is_err());
        assert!(set_value(&path, "import.header_row", "\"two\"").is_err());
        assert!(!path.exists());

        set_value(&path, "import.header_row", "2").unwrap();
        assert_eq!(TradedocConfig::from_file(&path).unwrap().import.header_row, 2);
    }
}
