//! CLI command implementations.

pub mod batch;
pub mod calc;
pub mod config;
pub mod fields;
pub mod interactive;

// Re-export submodules for convenience
pub use batch::BatchArgs;
pub use calc::CalcArgs;
pub use config::ConfigArgs;

use std::path::{Path, PathBuf};

use ltv_core::{Currency, Field, RawInput};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::settings::Config;

/// Settings shared by every command.
pub struct Context {
    /// Resolved output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Loaded preferences.
    pub config: Config,
    /// Where the preferences live.
    pub config_path: PathBuf,
}

impl Context {
    /// Currency used when the input does not name one.
    pub fn default_currency(&self) -> Currency {
        self.config.currency()
    }

    /// Fills in the configured currency if `raw` has none.
    pub fn fill_currency(&self, raw: &mut RawInput) {
        if raw.get(Field::Currency).is_none() {
            raw.set(Field::Currency, self.default_currency().code());
        }
    }
}

/// Reads an input document, JSON for `.json` files and TOML otherwise.
pub fn load_input(path: &Path) -> CliResult<RawInput> {
    let input_error = |reason: String| CliError::InputFile {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| input_error(e.to_string()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        RawInput::from_json_str(&content)
    } else {
        RawInput::from_toml_str(&content)
    };
    parsed.map_err(|e| input_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltv_core::RawValue;

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("input.json");
        std::fs::write(&json, r#"{"avPurchaseValue": "1000", "referrals": 1}"#).unwrap();
        let raw = load_input(&json).unwrap();
        assert_eq!(raw.get(Field::AvPurchaseValue), Some(&RawValue::from("1000")));

        let toml = dir.path().join("input.toml");
        std::fs::write(&toml, "currency = \"GBP\"\nfulfillmentCost = 20\n").unwrap();
        let raw = load_input(&toml).unwrap();
        assert_eq!(raw.get(Field::Currency), Some(&RawValue::from("GBP")));
        assert_eq!(raw.get(Field::FulfillmentCost), Some(&RawValue::Number(20.0)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_input(Path::new("/nonexistent/input.json")).unwrap_err();
        assert!(matches!(err, CliError::InputFile { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
