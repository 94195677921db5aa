//! Config command implementation.
//!
//! Manages CLI configuration settings.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};
use crate::settings::{Config, ConfigKey};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &mut Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx.format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

fn parse_key(name: &str) -> Result<ConfigKey, CliError> {
    ConfigKey::from_name(name).ok_or_else(|| CliError::UnknownConfigKey(name.to_string()))
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config: &Config = &ctx.config;

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    let value = config.get(*key);
                    if config.is_set(*key) {
                        KeyValue::new(key.as_str(), value)
                    } else {
                        KeyValue::new(key.as_str(), format!("{value} (default)"))
                    }
                })
                .collect();
            if ctx.format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, &str> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.get(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.get(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let key = parse_key(&args.key)?;
    let value = ctx.config.get(key);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, ctx: &mut Context) -> Result<()> {
    let key = parse_key(&args.key)?;
    let stored = ctx.config.set(key, &args.value)?;
    ctx.config.save_to(&ctx.config_path)?;

    if !ctx.quiet {
        print_success(&format!("Set {} = {}", key.as_str(), stored));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, ctx: &mut Context) -> Result<()> {
    if args.all {
        ctx.config.clear();
        ctx.config.save_to(&ctx.config_path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = parse_key(&key_str)?;
        ctx.config.remove(key);
        ctx.config.save_to(&ctx.config_path)?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = &ctx.config_path;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
