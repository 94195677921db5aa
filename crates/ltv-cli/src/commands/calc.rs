//! Calc command implementation.
//!
//! Validates one set of inputs and prints the customer LTV.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use ltv_core::calculator::LtvBreakdown;
use ltv_core::validation::validate;
use ltv_core::{CalculationInput, Field, RawInput};

use super::{load_input, Context};
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_ltv_label, print_output, KeyValue};

/// Arguments for the calc command.
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Currency (USD, EUR, GBP). Defaults to the configured currency.
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Average purchase value (>= 1)
    #[arg(long, allow_hyphen_values = true)]
    pub av_purchase_value: Option<String>,

    /// Fulfillment cost as a percentage of revenue (1 to 99)
    #[arg(long, allow_hyphen_values = true)]
    pub fulfillment_cost: Option<String>,

    /// Repeat purchases per customer per year (>= 0)
    #[arg(long, allow_hyphen_values = true)]
    pub returns_per_year: Option<String>,

    /// Years a customer stays active (>= 1)
    #[arg(long, allow_hyphen_values = true)]
    pub customer_terms: Option<String>,

    /// Referrals per customer (>= 0)
    #[arg(long, allow_hyphen_values = true)]
    pub referrals: Option<String>,

    /// JSON or TOML file with the inputs. Flags override its values.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Show every step of the calculation
    #[arg(short, long)]
    pub breakdown: bool,
}

impl CalcArgs {
    /// Values given on the command line, as unvalidated text.
    fn to_raw(&self) -> RawInput {
        let mut raw = RawInput::new();
        for (field, value) in [
            (Field::Currency, &self.currency),
            (Field::AvPurchaseValue, &self.av_purchase_value),
            (Field::FulfillmentCost, &self.fulfillment_cost),
            (Field::ReturnsPerYear, &self.returns_per_year),
            (Field::CustomerTerms, &self.customer_terms),
            (Field::Referrals, &self.referrals),
        ] {
            if let Some(value) = value {
                raw.set(field, value.as_str());
            }
        }
        raw
    }
}

/// JSON rendering of a calculation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalcReport {
    input: CalculationInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<LtvBreakdown>,
    customer_ltv: String,
    label: String,
}

/// Execute the calc command.
pub fn execute(args: CalcArgs, ctx: &Context) -> Result<()> {
    let mut raw = match &args.input {
        Some(path) => load_input(path)?,
        None => RawInput::new(),
    };
    raw.merge(args.to_raw());
    ctx.fill_currency(&mut raw);

    let input = validate(&raw).map_err(CliError::from)?;
    let breakdown = LtvBreakdown::compute(&input).map_err(CliError::from)?;
    let ltv = breakdown.customer_ltv();
    info!(currency = %input.currency(), ltv = %ltv, "customer LTV computed");

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Inputs");
                print_output(&input_rows(&input), ctx.format)?;
                if args.breakdown {
                    print_header("Calculation");
                    print_output(&step_rows(&breakdown), ctx.format)?;
                }
                println!();
            }
            print_ltv_label(&ltv.label());
        }
        OutputFormat::Json => {
            let report = CalcReport {
                input,
                breakdown: args.breakdown.then_some(breakdown),
                customer_ltv: ltv.to_string(),
                label: ltv.label(),
            };
            print_json(&report)?;
        }
        OutputFormat::Csv => {
            let mut rows = input_rows(&input);
            if args.breakdown {
                rows.extend(step_rows(&breakdown));
            }
            rows.push(KeyValue::new("Customer LTV", ltv.to_string()));
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Minimal => {
            println!("{}", ltv.label());
        }
    }

    Ok(())
}

fn input_rows(input: &CalculationInput) -> Vec<KeyValue> {
    let mut rows = vec![KeyValue::new(
        Field::Currency.label(),
        format!("{} ({})", input.currency(), input.currency().symbol()),
    )];
    for field in Field::NUMERIC {
        if let Some(value) = input.value(field) {
            let mut kv = KeyValue::from_decimal(field.label(), value);
            if let Some(unit) = field.unit() {
                kv.value.push_str(unit);
            }
            rows.push(kv);
        }
    }
    rows
}

fn step_rows(breakdown: &LtvBreakdown) -> Vec<KeyValue> {
    breakdown
        .steps()
        .into_iter()
        .map(|(name, value)| KeyValue::from_decimal(name, value))
        .collect()
}
