//! Batch command implementation.
//!
//! Treats every row of a CSV file as one submission. Headers are field keys
//! (`avPurchaseValue` or `av_purchase_value`); unknown columns are ignored.
//! Invalid rows are reported in place and do not stop the batch.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::{info, warn};

use ltv_core::calculator::customer_ltv;
use ltv_core::validation::validate;
use ltv_core::{Currency, Field, LtvError, RawInput, ValidationErrors};

use super::Context;
use crate::error::CliError;
use crate::cli::OutputFormat;
use crate::output::{print_output, print_success};

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV file with one set of inputs per row
    pub file: PathBuf,

    /// Write the results as CSV to this file instead of printing them
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Result for one input row.
#[derive(Debug, Clone, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    #[tabled(rename = "Row")]
    pub row: usize,
    #[tabled(rename = "Currency")]
    pub currency: String,
    #[tabled(rename = "Customer LTV")]
    pub customer_ltv: String,
    #[tabled(rename = "Errors")]
    pub errors: String,
}

/// Execute the batch command.
pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    let file = std::fs::File::open(&args.file).map_err(|e| CliError::InputFile {
        path: args.file.display().to_string(),
        reason: e.to_string(),
    })?;
    let rows = process(file, &args.file, ctx.default_currency())?;
    let failed = rows.iter().filter(|r| !r.errors.is_empty()).count();
    info!(rows = rows.len(), failed, "batch processed");

    match args.output {
        Some(path) => {
            let mut wtr = csv::Writer::from_path(&path)?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
            if !ctx.quiet {
                print_success(&format!(
                    "Wrote {} rows ({} invalid) to {}",
                    rows.len(),
                    failed,
                    path.display()
                ));
            }
        }
        None if ctx.format == OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.minimal());
            }
        }
        None => print_output(&rows, ctx.format)?,
    }

    Ok(())
}

impl BatchRow {
    /// One-line rendering: the LTV label, or the errors for an invalid row.
    pub fn minimal(&self) -> String {
        if self.errors.is_empty() {
            self.customer_ltv.clone()
        } else {
            format!("row {}: {}", self.row, self.errors)
        }
    }
}

/// Runs every CSV row through validation and the calculator.
///
/// Rows may be shorter or longer than the header. Missing cells count as
/// absent values and extra cells are ignored.
pub fn process<R: Read>(
    reader: R,
    source: &Path,
    default_currency: Currency,
) -> Result<Vec<BatchRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<Option<Field>> = rdr.headers()?.iter().map(Field::from_key).collect();
    if columns.iter().all(Option::is_none) {
        return Err(CliError::InputFile {
            path: source.display().to_string(),
            reason: "no column matches a field key".into(),
        }
        .into());
    }
    for (header, column) in rdr.headers()?.iter().zip(&columns) {
        if column.is_none() {
            warn!(column = header, "ignoring unknown column");
        }
    }

    let mut rows = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let mut raw = RawInput::new().with(Field::Currency, default_currency.code());
        for (column, value) in columns.iter().zip(record.iter()) {
            if let Some(field) = column {
                if !value.is_empty() {
                    raw.set(*field, value);
                }
            }
        }
        rows.push(evaluate(index + 1, &raw));
    }
    Ok(rows)
}

fn evaluate(row: usize, raw: &RawInput) -> BatchRow {
    let result = validate(raw)
        .map_err(LtvError::from)
        .and_then(|input| customer_ltv(&input).map(|ltv| (input, ltv)));

    match result {
        Ok((input, ltv)) => BatchRow {
            row,
            currency: input.currency().code().to_string(),
            customer_ltv: ltv.label(),
            errors: String::new(),
        },
        Err(err) => BatchRow {
            row,
            currency: raw
                .get(Field::Currency)
                .map(ToString::to_string)
                .unwrap_or_default(),
            customer_ltv: String::new(),
            errors: err
                .validation_errors()
                .map_or_else(|| err.to_string(), ValidationErrors::summary),
        },
    }
}
