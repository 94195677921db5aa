//! ltv CLI - Command-line customer lifetime value calculator.
//!
//! # Usage
//!
//! ```bash
//! # Compute the LTV of one set of inputs
//! ltv calc --currency EUR --av-purchase-value 1000 --fulfillment-cost 20 \
//!     --returns-per-year 8 --customer-terms 5 --referrals 1
//!
//! # Same, from a file, with every step shown
//! ltv calc --input inputs.toml --breakdown
//!
//! # Fill the form field by field
//! ltv interactive
//!
//! # One LTV per CSV row
//! ltv batch customers.csv --output results.csv
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use error::CliError;
use settings::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err}"));
            ExitCode::from(err.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = settings::config_path(cli.config_dir.as_deref())?;
    let config = Config::load_from(&config_path)?;

    if cli.no_color || !config.use_colors() {
        colored::control::set_override(false);
    }

    let mut ctx = Context {
        format: cli.format.unwrap_or_else(|| config.format()),
        quiet: cli.quiet,
        config,
        config_path,
    };

    match cli.command {
        Commands::Calc(args) => commands::calc::execute(args, &ctx)?,
        Commands::Interactive => commands::interactive::execute(&ctx)?,
        Commands::Batch(args) => commands::batch::execute(args, &ctx)?,
        Commands::Fields => commands::fields::execute(&ctx)?,
        Commands::Config(args) => commands::config::execute(args, &mut ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
