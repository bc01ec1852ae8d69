//! Futures price sheet loader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use carrybook_analytics::forward::ForwardRateMatrix;
use carrybook_analytics::types::Contract;
use carrybook_core::{CarryResult, Date};
use serde::Deserialize;

use crate::error::{IngestError, IngestResult};
use crate::parse::{parse_date, parse_price};

/// Columns every futures sheet must carry.
pub const FUTURES_COLUMNS: &[&str] = &["Contract_Code", "last_price", "Maturity"];

/// CSV record for one futures contract.
#[derive(Debug, Deserialize)]
struct FuturesRecord {
    #[serde(rename = "Contract_Code")]
    contract_code: String,
    #[serde(rename = "last_price")]
    last_price: String,
    #[serde(rename = "Maturity")]
    maturity: String,
}

/// Parses a maturity cell. Feed exports sometimes prefix the date with a
/// status label (`Real Tir 1/16/2026`), so the last token is tried too.
fn parse_maturity(cell: &str) -> CarryResult<Date> {
    parse_date(cell).or_else(|err| {
        cell.split_whitespace()
            .last()
            .map_or(Err(err), parse_date)
    })
}

/// Loads a futures price sheet from disk.
///
/// Days to expiry are measured from `reference_date`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or a row has no ticker or no readable maturity. Invalid prices
/// are not errors; the contract is kept with no price.
pub fn load_contracts(path: impl AsRef<Path>, reference_date: Date) -> IngestResult<Vec<Contract>> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| IngestError::io(path.display().to_string(), e.to_string()))?;
    read_contracts(file, &path.display().to_string(), reference_date)
}

/// Reads a futures price sheet from any reader.
///
/// # Errors
///
/// See [`load_contracts`].
pub fn read_contracts<R: Read>(
    reader: R,
    source_name: &str,
    reference_date: Date,
) -> IngestResult<Vec<Contract>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| IngestError::malformed_row(source_name, 1, e.to_string()))?
        .clone();
    for column in FUTURES_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(IngestError::missing_column(source_name, *column));
        }
    }

    let mut contracts = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, csv::Position::line);
            IngestError::malformed_row(source_name, line, e.to_string())
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let row: FuturesRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| IngestError::malformed_row(source_name, line, e.to_string()))?;
        if row.contract_code.is_empty() {
            return Err(IngestError::malformed_row(source_name, line, "empty Contract_Code"));
        }

        let delivery = parse_maturity(&row.maturity)
            .map_err(|e| IngestError::malformed_row(source_name, line, e.to_string()))?;
        let price = parse_price(&row.last_price);
        if price.is_none() {
            log::warn!(
                "{source_name}, line {line}: no valid price for {} ('{}')",
                row.contract_code,
                row.last_price
            );
        }

        contracts.push(Contract::new(row.contract_code, price, delivery, reference_date));
    }

    log::debug!(
        "loaded {} contracts from {source_name} ({} unpriced)",
        contracts.len(),
        contracts.iter().filter(|c| !c.has_valid_price()).count()
    );
    Ok(contracts)
}

/// Loads one or two price sheets and builds the forward rate matrix.
///
/// With a single sheet both ends of every spread use its prices. With a
/// separate TO-side sheet, contracts are checked for consistency across
/// both sets before the matrix is built.
///
/// # Errors
///
/// Returns any load error, or `CarryError::DataIntegrityError` (wrapped)
/// if a contract appears with contradictory values.
pub fn load_forward_matrix(
    from_path: impl AsRef<Path>,
    to_path: Option<&Path>,
    reference_date: Date,
) -> IngestResult<ForwardRateMatrix> {
    let from_side = load_contracts(from_path, reference_date)?;
    let matrix = match to_path {
        Some(path) => {
            let to_side = load_contracts(path, reference_date)?;
            ForwardRateMatrix::from_price_sets(&from_side, &to_side)?
        }
        None => ForwardRateMatrix::build(&from_side)?,
    };
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference() -> Date {
        Date::from_ymd(2026, 2, 27).unwrap()
    }

    #[test]
    fn test_invalid_markers_become_unpriced() {
        let data = "Contract_Code,last_price,Maturity\n\
                    AXWF6,#N/A,Real Tir 1/16/2026\n\
                    AXWG6,VALUEERROR,2/20/2026\n\
                    AXWH6,44.5,2026-03-20\n";
        let contracts = read_contracts(data.as_bytes(), "inline", reference()).unwrap();

        assert_eq!(contracts.len(), 3);
        assert_eq!(contracts[0].price, None);
        assert_eq!(contracts[0].days_to_expiry, -42);
        assert_eq!(contracts[1].price, None);
        assert_eq!(contracts[1].days_to_expiry, -7);
        assert_eq!(contracts[2].price, Some(dec!(44.5)));
        assert_eq!(contracts[2].days_to_expiry, 21);
    }

    #[test]
    fn test_bad_maturity_names_line() {
        let data = "Contract_Code,last_price,Maturity\nAXWH6,44.5,2026-03-20\nAXWM6,51.5,soon\n";
        let err = read_contracts(data.as_bytes(), "futures.csv", reference()).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().starts_with("futures.csv, line 3"));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "Start,Contract_Code,last_price,Maturity,Days_to_maturity\n\
                    21,AXWH6,44.5,3/20/2026,21\n";
        let contracts = read_contracts(data.as_bytes(), "inline", reference()).unwrap();
        assert_eq!(contracts[0].ticker, "AXWH6");
    }
}
