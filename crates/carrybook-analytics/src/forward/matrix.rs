//! N×N implied forward rate matrix.

use carrybook_core::{CarryError, CarryResult};
use rust_decimal::Decimal;
use serde::Serialize;

use super::rate::{implied_forward_rate, ForwardRateCell};
use crate::types::Contract;

/// Forward rates for every (FROM, TO) pair of a contract universe.
///
/// Rows are FROM contracts and columns are TO contracts, both in the order
/// the universe was supplied. The matrix is rebuilt from scratch for each
/// snapshot and never updated in place.
///
/// # Example
///
/// ```rust
/// use carrybook_analytics::forward::ForwardRateMatrix;
/// use carrybook_analytics::types::Contract;
/// use carrybook_core::Date;
/// use rust_decimal_macros::dec;
///
/// let reference = Date::from_ymd(2026, 2, 27).unwrap();
/// let contracts = vec![
///     Contract::new("AXWH6", Some(dec!(44.5)), Date::from_ymd(2026, 3, 20).unwrap(), reference),
///     Contract::new("AXWM6", Some(dec!(51.5)), Date::from_ymd(2026, 6, 18).unwrap(), reference),
/// ];
///
/// let matrix = ForwardRateMatrix::build(&contracts).unwrap();
/// assert!(matrix.cell("AXWH6", "AXWH6").unwrap().is_dark());
/// assert!(matrix.cell("AXWH6", "AXWM6").unwrap().rate().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardRateMatrix {
    contracts: Vec<Contract>,
    cells: Vec<Vec<ForwardRateCell>>,
}

impl ForwardRateMatrix {
    /// Builds the matrix from a single price set.
    ///
    /// A ticker may appear more than once only if every occurrence agrees;
    /// repeated tickers collapse to their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataIntegrityError` if a ticker appears with
    /// differing price, delivery date or days to expiry.
    pub fn build(contracts: &[Contract]) -> CarryResult<Self> {
        let universe = consistent_universe(contracts.iter())?;
        Ok(Self::from_universe(universe))
    }

    /// Builds the matrix from separate FROM-side and TO-side price sets.
    ///
    /// The universe is the union of both sets in first-seen order, FROM
    /// side first.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataIntegrityError` if any ticker carries
    /// different values in the two sets (or twice within one set).
    pub fn from_price_sets(from_side: &[Contract], to_side: &[Contract]) -> CarryResult<Self> {
        let universe = consistent_universe(from_side.iter().chain(to_side))?;
        Ok(Self::from_universe(universe))
    }

    fn from_universe(contracts: Vec<Contract>) -> Self {
        let cells: Vec<Vec<ForwardRateCell>> = contracts
            .iter()
            .map(|from| {
                contracts
                    .iter()
                    .map(|to| implied_forward_rate(from, to))
                    .collect()
            })
            .collect();

        let matrix = Self { contracts, cells };
        log::debug!(
            "forward rate matrix: {} contracts, {} computed, {} dark",
            matrix.len(),
            matrix.computed_rates().count(),
            matrix.dark_count()
        );
        matrix
    }

    /// Cell for a (FROM, TO) ticker pair.
    #[must_use]
    pub fn cell(&self, from: &str, to: &str) -> Option<ForwardRateCell> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        self.cell_at(i, j)
    }

    /// Cell at a (row, column) position.
    #[must_use]
    pub fn cell_at(&self, row: usize, column: usize) -> Option<ForwardRateCell> {
        self.cells.get(row)?.get(column).copied()
    }

    /// All cells with `from` as the FROM contract.
    #[must_use]
    pub fn row(&self, from: &str) -> Option<&[ForwardRateCell]> {
        let i = self.index_of(from)?;
        self.cells.get(i).map(Vec::as_slice)
    }

    /// Number of contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Tickers in row/column order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(|c| c.ticker.as_str())
    }

    /// Contracts in row/column order.
    #[must_use]
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Every computed cell as `(from, to, rate)`, row-major.
    pub fn computed_rates(&self) -> impl Iterator<Item = (&Contract, &Contract, Decimal)> {
        self.cells.iter().enumerate().flat_map(move |(i, row)| {
            row.iter().enumerate().filter_map(move |(j, cell)| {
                cell.rate()
                    .map(|rate| (&self.contracts[i], &self.contracts[j], rate))
            })
        })
    }

    /// Number of dark cells.
    #[must_use]
    pub fn dark_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_dark())
            .count()
    }

    fn index_of(&self, ticker: &str) -> Option<usize> {
        self.contracts.iter().position(|c| c.ticker == ticker)
    }
}

/// Deduplicates contracts by ticker, failing on any disagreement.
fn consistent_universe<'a>(
    contracts: impl Iterator<Item = &'a Contract>,
) -> CarryResult<Vec<Contract>> {
    let mut universe: Vec<Contract> = Vec::new();

    for contract in contracts {
        match universe.iter().find(|c| c.ticker == contract.ticker) {
            None => universe.push(contract.clone()),
            Some(seen) if seen == contract => {}
            Some(seen) => return Err(integrity_error(seen, contract)),
        }
    }

    Ok(universe)
}

fn integrity_error(seen: &Contract, other: &Contract) -> CarryError {
    let reason = if seen.price != other.price {
        format!(
            "price {} does not match {}",
            describe_price(other.price),
            describe_price(seen.price)
        )
    } else if seen.delivery_date != other.delivery_date {
        format!(
            "delivery date {} does not match {}",
            other.delivery_date, seen.delivery_date
        )
    } else {
        format!(
            "days to expiry {} does not match {}",
            other.days_to_expiry, seen.days_to_expiry
        )
    };
    CarryError::data_integrity(&seen.ticker, reason)
}

fn describe_price(price: Option<Decimal>) -> String {
    price.map_or_else(|| "<invalid>".to_string(), |p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::DarkReason;
    use carrybook_core::Date;
    use rust_decimal_macros::dec;

    fn contract(ticker: &str, price: Option<Decimal>, days: i64) -> Contract {
        let reference = Date::from_ymd(2026, 2, 27).unwrap();
        Contract::with_days(ticker, price, reference.add_days(days), days)
    }

    #[test]
    fn test_shape_and_diagonal() {
        let m = ForwardRateMatrix::build(&[
            contract("AXWH6", Some(dec!(44.5)), 21),
            contract("AXWJ6", Some(dec!(72)), 49),
            contract("AXWM6", Some(dec!(51.5)), 111),
        ])
        .unwrap();

        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(
                m.cell_at(i, i),
                Some(ForwardRateCell::Dark(DarkReason::NotOrdered))
            );
        }
        // Upper triangle computed, lower triangle and diagonal dark
        assert_eq!(m.computed_rates().count(), 3);
        assert_eq!(m.dark_count(), 6);
        assert!(m.cell_at(3, 0).is_none());
    }

    #[test]
    fn test_lookup_by_ticker() {
        let m = ForwardRateMatrix::build(&[
            contract("AXWH6", Some(dec!(44.5)), 21),
            contract("AXWM6", Some(dec!(51.5)), 111),
        ])
        .unwrap();
        assert!(m.cell("AXWH6", "AXWM6").unwrap().rate().is_some());
        assert!(m.cell("AXWM6", "AXWH6").unwrap().is_dark());
        assert!(m.cell("AXWH6", "AXWU6").is_none());
        assert_eq!(m.row("AXWH6").map(<[_]>::len), Some(2));
        assert_eq!(m.tickers().collect::<Vec<_>>(), vec!["AXWH6", "AXWM6"]);
    }

    #[test]
    fn test_identical_duplicates_collapse() {
        let m = ForwardRateMatrix::build(&[
            contract("AXWH6", Some(dec!(44.5)), 21),
            contract("AXWH6", Some(dec!(44.5)), 21),
        ])
        .unwrap();
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_conflicting_price_in_one_set() {
        let err = ForwardRateMatrix::build(&[
            contract("AXWH6", Some(dec!(44.5)), 21),
            contract("AXWH6", None, 21),
        ])
        .unwrap_err();
        assert!(err.is_integrity_error());
        assert!(err.to_string().contains("AXWH6"));
    }

    #[test]
    fn test_price_sets_union() {
        let m = ForwardRateMatrix::from_price_sets(
            &[contract("AXWH6", Some(dec!(44.5)), 21)],
            &[
                contract("AXWH6", Some(dec!(44.5)), 21),
                contract("AXWM6", Some(dec!(51.5)), 111),
            ],
        )
        .unwrap();
        assert_eq!(m.tickers().collect::<Vec<_>>(), vec!["AXWH6", "AXWM6"]);
    }

    #[test]
    fn test_conflicting_delivery_across_sets() {
        let mut moved = contract("AXWM6", Some(dec!(51.5)), 111);
        moved.delivery_date = moved.delivery_date.add_days(1);
        let err = ForwardRateMatrix::from_price_sets(
            &[contract("AXWM6", Some(dec!(51.5)), 111)],
            &[moved],
        )
        .unwrap_err();
        assert!(err.to_string().contains("delivery date"));
    }

    #[test]
    fn test_empty() {
        let m = ForwardRateMatrix::build(&[]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.dark_count(), 0);
    }
}
