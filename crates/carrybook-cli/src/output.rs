//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints `rows` as a table or CSV, or `raw` as JSON.
///
/// JSON keeps full precision; table and CSV use the formatted rows.
pub fn print_output<R, J>(rows: &[R], raw: &J, format: OutputFormat) -> anyhow::Result<()>
where
    R: Serialize + Tabled,
    J: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(raw),
        OutputFormat::Csv => print_csv(rows),
    }
}

/// Prints a grid with a header row and a row label column, or `raw` as
/// JSON.
pub fn print_grid<J: Serialize + ?Sized>(
    header: Vec<String>,
    body: Vec<Vec<String>>,
    raw: &J,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if body.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let table = Builder::from_iter(std::iter::once(header).chain(body))
                .build()
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            println!("{table}");
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(&header)?;
            for row in &body {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(raw)?,
    }
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a USD amount to cents with thousands separators.
pub fn format_usd(value: Decimal) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{cents}")
}

/// Formats an optional value, `-` when absent.
pub fn format_opt(value: Option<Decimal>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a decimal value.
    pub fn from_decimal(key: impl Into<String>, value: Decimal, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format!("{:.prec$}", value, prec = precision),
        }
    }

    /// Creates a key-value pair formatted as a USD amount.
    pub fn from_usd(key: impl Into<String>, value: Decimal) -> Self {
        Self::new(key, format_usd(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "0.00");
        assert_eq!(format_usd(dec!(999.5)), "999.50");
        assert_eq!(format_usd(dec!(1000)), "1,000.00");
        assert_eq!(format_usd(dec!(-12000)), "-12,000.00");
        assert_eq!(format_usd(dec!(50012000.126)), "50,012,000.13");
    }

    #[test]
    fn test_format_opt() {
        assert_eq!(format_opt(Some(dec!(6.1)), 2), "6.10");
        assert_eq!(format_opt(None, 2), "-");
    }
}
