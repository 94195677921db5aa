//! Persistent CLI preferences.
//!
//! Stored as a flat JSON object at `<config dir>/ltv/config.json`. Unset keys
//! fall back to their defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ltv_core::Currency;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

const CONFIG_FILE: &str = "config.json";

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Currency used when none is given
    DefaultCurrency,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    /// Looks a key up by name or short alias.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_currency" | "currency" => Some(Self::DefaultCurrency),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    /// Key as stored in the file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultCurrency => "default_currency",
            Self::UseColors => "use_colors",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultCurrency => "Currency used when none is given (USD, EUR, GBP)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    /// Value used when the key is unset.
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DefaultCurrency => "EUR",
            Self::UseColors => "true",
        }
    }

    /// Every key.
    pub fn all() -> &'static [Self] {
        &[Self::DefaultFormat, Self::DefaultCurrency, Self::UseColors]
    }

    /// Checks a value for this key, returning it in stored form.
    pub fn normalize(&self, value: &str) -> CliResult<String> {
        let value = value.trim();
        let invalid = |expected| CliError::InvalidConfigValue {
            key: self.as_str(),
            value: value.to_string(),
            expected,
        };
        match self {
            Self::DefaultFormat => OutputFormat::from_name(value)
                .map(|_| value.to_lowercase())
                .ok_or_else(|| invalid("use table, json, csv, or minimal")),
            Self::DefaultCurrency => Currency::from_code(value)
                .map(|c| c.code().to_string())
                .ok_or_else(|| invalid("use USD, EUR, or GBP")),
            Self::UseColors => parse_bool(value)
                .map(|b| b.to_string())
                .ok_or_else(|| invalid("use true or false")),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Simple config storage.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    /// Loads the file at `path`, or an empty config if it does not exist.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the stored value, or the key's default.
    pub fn get(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    /// Returns true if the key was set explicitly.
    pub fn is_set(&self, key: ConfigKey) -> bool {
        self.values.contains_key(key.as_str())
    }

    /// Validates and stores a value.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> CliResult<String> {
        let normalized = key.normalize(value)?;
        self.values.insert(key.as_str().to_string(), normalized.clone());
        Ok(normalized)
    }

    /// Removes a value, restoring its default.
    pub fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Configured output format.
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_name(self.get(ConfigKey::DefaultFormat)).unwrap_or_default()
    }

    /// Configured default currency.
    pub fn currency(&self) -> Currency {
        Currency::from_code(self.get(ConfigKey::DefaultCurrency)).unwrap_or_default()
    }

    /// Whether colored output is enabled.
    pub fn use_colors(&self) -> bool {
        parse_bool(self.get(ConfigKey::UseColors)).unwrap_or(true)
    }
}

/// Resolves the config file path.
///
/// `dir` (from `--config-dir` / `LTV_CONFIG_DIR`) takes precedence over the
/// platform config directory.
pub fn config_path(dir: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
    Ok(home.join("ltv").join(CONFIG_FILE))
}
