//! Position sheet loader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use carrybook_analytics::types::{Position, PositionType, StrategyType};
use carrybook_core::{CarryResult, Direction};
use serde::Deserialize;

use crate::error::{IngestError, IngestResult};
use crate::parse::{parse_date, parse_flag, parse_money, parse_percent, parse_price, parse_shares};

/// Columns every position sheet must carry.
pub const POSITION_COLUMNS: &[&str] = &[
    "BASKET_ID",
    "POSITION_ID",
    "POSITION_TYPE",
    "STRATEGY_TYPE",
    "LONG_SHORT",
    "NOTIONAL_USD",
    "FINANCING_RATE_%",
    "START_DATE",
    "END_DATE",
    "PNL_USD",
];

/// CSV record for one position leg. Extra sheet columns are ignored.
#[derive(Debug, Deserialize)]
struct PositionRecord {
    #[serde(rename = "BASKET_ID")]
    basket_id: String,
    #[serde(rename = "POSITION_ID")]
    position_id: String,
    #[serde(rename = "POSITION_TYPE")]
    position_type: String,
    #[serde(rename = "STRATEGY_TYPE")]
    strategy_type: String,
    #[serde(rename = "LONG_SHORT")]
    long_short: String,
    #[serde(rename = "NOTIONAL_USD")]
    notional_usd: String,
    #[serde(rename = "FINANCING_RATE_%")]
    financing_rate_pct: String,
    #[serde(rename = "START_DATE")]
    start_date: String,
    #[serde(rename = "END_DATE")]
    end_date: String,
    #[serde(rename = "PNL_USD")]
    pnl_usd: String,
    #[serde(rename = "UNDERLYING", default)]
    underlying: Option<String>,
    #[serde(rename = "ROLL_EVENT_FLAG", default)]
    roll_event_flag: Option<String>,
    #[serde(rename = "QUANTITY", default)]
    quantity: Option<String>,
    #[serde(rename = "PRICE_OR_LEVEL", default)]
    price_or_level: Option<String>,
}

impl PositionRecord {
    fn is_blank(&self) -> bool {
        self.basket_id.is_empty() && self.position_id.is_empty()
    }

    fn into_position(self) -> CarryResult<Position> {
        let mut builder = Position::builder()
            .basket_id(self.basket_id)
            .position_id(self.position_id)
            .position_type(self.position_type.parse::<PositionType>()?)
            .strategy(self.strategy_type.parse::<StrategyType>()?)
            .direction(self.long_short.parse::<Direction>()?)
            .notional(parse_money(&self.notional_usd)?)
            .financing_rate(parse_percent(&self.financing_rate_pct)?)
            .start_date(parse_date(&self.start_date)?)
            .end_date(parse_date(&self.end_date)?)
            .realized_pnl(parse_money(&self.pnl_usd)?)
            .roll_flag(parse_flag(self.roll_event_flag.as_deref().unwrap_or_default())?);

        if let Some(underlying) = self.underlying.filter(|u| !u.is_empty()) {
            builder = builder.underlying(underlying);
        }
        if let Some(shares) = parse_shares(self.quantity.as_deref().unwrap_or_default())? {
            builder = builder.quantity(shares);
        }
        if let Some(price) = self.price_or_level.as_deref().and_then(parse_price) {
            builder = builder.price(price);
        }

        builder.build()
    }
}

/// Loads a position sheet from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or any row is malformed. Row errors carry the line number.
pub fn load_positions(path: impl AsRef<Path>) -> IngestResult<Vec<Position>> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| IngestError::io(path.display().to_string(), e.to_string()))?;
    read_positions(file, &path.display().to_string())
}

/// Reads a position sheet from any reader.
///
/// `source_name` labels error messages. Rows with neither a basket nor a
/// position id (sheet totals, spacer rows) are skipped.
///
/// # Errors
///
/// See [`load_positions`].
pub fn read_positions<R: Read>(reader: R, source_name: &str) -> IngestResult<Vec<Position>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| IngestError::malformed_row(source_name, 1, e.to_string()))?
        .clone();
    for column in POSITION_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(IngestError::missing_column(source_name, *column));
        }
    }

    let mut positions = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, csv::Position::line);
            IngestError::malformed_row(source_name, line, e.to_string())
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let row: PositionRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| IngestError::malformed_row(source_name, line, e.to_string()))?;
        if row.is_blank() {
            log::warn!("{source_name}, line {line}: skipping row without basket or position id");
            continue;
        }

        let position = row
            .into_position()
            .map_err(|e| IngestError::malformed_row(source_name, line, e.to_string()))?;
        positions.push(position);
    }

    log::debug!("loaded {} positions from {source_name}", positions.len());
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "BASKET_ID,POSITION_ID,POSITION_TYPE,STRATEGY_TYPE,LONG_SHORT,NOTIONAL_USD,FINANCING_RATE_%,START_DATE,END_DATE,PNL_USD";

    #[test]
    fn test_read_minimal_row() {
        let data = format!(
            "{HEADER}\nBasket1,B1-FUT,FUTURE,Simple Carry,SHORT,\"50,000,000\",5.35,2025-12-19,3/20/2026,\"$ (7,500)\"\n"
        );
        let positions = read_positions(data.as_bytes(), "inline").unwrap();

        assert_eq!(positions.len(), 1);
        let p = &positions[0];
        assert_eq!(p.position_type, PositionType::Future);
        assert_eq!(p.direction, Direction::Short);
        assert_eq!(p.notional, dec!(50_000_000));
        assert_eq!(p.financing_rate, dec!(0.0535));
        assert_eq!(p.realized_pnl, dec!(-7_500));
        assert_eq!(p.underlying, None);
        assert!(!p.roll_flag);
    }

    #[test]
    fn test_quantity_and_price_columns() {
        let data = format!(
            "{HEADER},UNDERLYING,QUANTITY,PRICE_OR_LEVEL\n\
             Basket4,B4-AAPL,EQUITY,Reverse Carry,SHORT,\"1,873,000\",0,2026-01-02,2026-03-20,-,AAPL UW Equity,\"(10,000)\",187.30\n\
             Basket4,B4-MSFT,EQUITY,Reverse Carry,SHORT,\"1,000,000\",0,2026-01-02,2026-03-20,-,MSFT UW Equity,,#N/A\n"
        );
        let positions = read_positions(data.as_bytes(), "inline").unwrap();

        assert_eq!(positions[0].quantity, Some(10_000));
        assert_eq!(positions[0].signed_quantity(), -10_000);
        assert_eq!(positions[0].price, Some(dec!(187.30)));
        assert_eq!(positions[1].quantity, None);
        assert_eq!(positions[1].price, None);
    }

    #[test]
    fn test_missing_column() {
        let data = "BASKET_ID,POSITION_ID\nBasket1,B1\n";
        let err = read_positions(data.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "POSITION_TYPE"));
    }

    #[test]
    fn test_blank_rows_skipped() {
        let data = format!(
            "{HEADER}\n,,,,,,,,,\"$1,000\"\nBasket1,B1-EQ,EQUITY,Simple Carry,LONG,100,0,2026-01-02,2026-03-20,-\n"
        );
        let positions = read_positions(data.as_bytes(), "inline").unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].realized_pnl, dec!(0));
    }
}
