//! Interactive command implementation.
//!
//! Prompts for each field in form order, submits, shows errors and the
//! current LTV, then starts over. Answers carry over between rounds.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use tracing::debug;

use ltv_core::{Currency, Field, LtvError, RawInput, RawValue, Session};

use super::Context;

/// Execute the interactive command.
pub fn execute(ctx: &Context) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut stdin.lock(), &mut stdout.lock(), ctx.default_currency())?;
    Ok(())
}

/// Runs the form loop until `quit`, `exit`, or end of input.
///
/// Returns the session as it was when the loop ended.
pub fn run<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    default_currency: Currency,
) -> io::Result<Session> {
    let mut session = Session::new();
    let mut answers = RawInput::new().with(Field::Currency, default_currency.code());

    writeln!(
        writer,
        "Enter each value and press return. A blank answer keeps the previous one; 'quit' leaves."
    )?;

    loop {
        for field in Field::ALL {
            write!(writer, "{}", prompt(field, answers.get(field)))?;
            writer.flush()?;

            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                writeln!(writer)?;
                return Ok(session);
            }
            let answer = line.trim();
            if matches!(answer, "quit" | "exit") {
                return Ok(session);
            }
            if !answer.is_empty() {
                answers.set(field, answer);
            }
        }

        match session.submit(&answers) {
            Ok(ltv) => debug!(ltv = %ltv, "form submitted"),
            Err(LtvError::Validation(errors)) => {
                for err in &errors {
                    writeln!(writer, "  {} {}", "✗".red(), err)?;
                }
            }
            Err(other) => writeln!(writer, "  {} {}", "✗".red(), other)?,
        }
        writeln!(writer, "{} {}", "Customer LTV:".bold(), session.label())?;
        writeln!(writer)?;
    }
}

fn prompt(field: Field, current: Option<&RawValue>) -> String {
    let label = match field.unit() {
        Some(unit) => format!("{} ({unit})", field.label()),
        None => field.label().to_string(),
    };
    match current {
        Some(value) => format!("{label} [{value}]: "),
        None => format!("{label} (e.g. {}): ", field.placeholder()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_with(input: &str) -> (Session, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let session = run(&mut reader, &mut out, Currency::EUR).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_single_round() {
        let (session, out) = run_with("\n1000\n20\n8\n5\n1\n");
        assert_eq!(session.label(), "$65600");
        assert!(out.contains("Average Purchase Value (e.g. 1000): "));
        assert!(out.contains("Fulfillment Cost (%)"));
        assert!(out.contains("$65600"));
    }

    #[test]
    fn test_invalid_round_then_correction() {
        let (session, out) = run_with("\n1000\n20\n-1\n5\n1\n\n\n\n8\n\n\nquit\n");
        assert_eq!(session.label(), "$65600");
        assert!(
            out.contains("Customer Returns Per Year: Number must be greater than or equal to 0")
        );
        assert!(out.contains("Customer Returns Per Year [-1]: "));
        assert_eq!(out.matches("Customer LTV:").count(), 2);
    }

    #[test]
    fn test_invalid_round_keeps_previous_value() {
        let (session, out) = run_with("\n1000\n20\n8\n5\n1\n\nabc\n\n\n\n\n");
        assert_eq!(session.label(), "$65600");
        assert!(out.contains("Average Purchase Value: Expected a number"));
    }

    #[test]
    fn test_quit_before_submitting() {
        let (session, _) = run_with("USD\n1000\nexit\n");
        assert_eq!(session.label(), "");
    }

    #[test]
    fn test_prompt_forms() {
        assert_eq!(prompt(Field::Referrals, None), "Referrals Per Customer (e.g. 1): ");
        assert_eq!(
            prompt(Field::Currency, Some(&RawValue::from("EUR"))),
            "Currency [EUR]: "
        );
    }
}
