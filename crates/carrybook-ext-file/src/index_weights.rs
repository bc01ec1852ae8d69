//! Index constituent weight loader.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{IngestError, IngestResult};

/// Columns every constituent sheet must carry.
pub const INDEX_WEIGHT_COLUMNS: &[&str] = &["BLOOMBERG_TICKER", "INDEX_WEIGHT"];

#[derive(Debug, Deserialize)]
struct WeightRecord {
    #[serde(rename = "BLOOMBERG_TICKER")]
    ticker: String,
    #[serde(rename = "INDEX_WEIGHT")]
    weight: String,
}

/// Loads index weights keyed by Bloomberg ticker.
///
/// Weights are decimal fractions as published (`0.002` for 0.2%).
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or a weight is not a number.
pub fn load_index_weights(path: impl AsRef<Path>) -> IngestResult<HashMap<String, Decimal>> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| IngestError::io(path.display().to_string(), e.to_string()))?;
    read_index_weights(file, &path.display().to_string())
}

/// Reads index weights from any reader.
///
/// Rows without a ticker or a weight are skipped. A ticker listed twice
/// keeps its last weight.
///
/// # Errors
///
/// See [`load_index_weights`].
pub fn read_index_weights<R: Read>(
    reader: R,
    source_name: &str,
) -> IngestResult<HashMap<String, Decimal>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| IngestError::malformed_row(source_name, 1, e.to_string()))?
        .clone();
    for column in INDEX_WEIGHT_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(IngestError::missing_column(source_name, *column));
        }
    }

    let mut weights = HashMap::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, csv::Position::line);
            IngestError::malformed_row(source_name, line, e.to_string())
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let row: WeightRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| IngestError::malformed_row(source_name, line, e.to_string()))?;
        if row.ticker.is_empty() || row.weight.is_empty() {
            skipped += 1;
            continue;
        }

        let weight = Decimal::from_str(&row.weight).map_err(|_| {
            IngestError::malformed_row(
                source_name,
                line,
                format!("cannot parse INDEX_WEIGHT '{}'", row.weight),
            )
        })?;
        weights.insert(row.ticker, weight);
    }

    if skipped > 0 {
        log::warn!("{source_name}: skipped {skipped} constituent rows without ticker or weight");
    }
    log::debug!("loaded {} index weights from {source_name}", weights.len());
    Ok(weights)
}
