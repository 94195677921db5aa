//! Fields command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use ltv_core::Field;

use super::Context;
use crate::cli::OutputFormat;
use crate::output::{print_header, print_output};

/// Description of one input field.
#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Accepts")]
    constraint: String,
    #[tabled(rename = "Example")]
    placeholder: &'static str,
}

/// Execute the fields command.
pub fn execute(ctx: &Context) -> Result<()> {
    let rows: Vec<FieldRow> = Field::ALL
        .into_iter()
        .map(|field| FieldRow {
            key: field.key(),
            label: field.label(),
            constraint: field.constraint(),
            placeholder: field.placeholder(),
        })
        .collect();

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.key);
            }
            Ok(())
        }
        OutputFormat::Table if !ctx.quiet => {
            print_header("Input Fields");
            print_output(&rows, ctx.format)
        }
        _ => print_output(&rows, ctx.format),
    }
}
