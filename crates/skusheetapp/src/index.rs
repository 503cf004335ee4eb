//! # Row Identifiers: UUID vs Position
//!
//! Rows carry a UUID, which is the right internal key and a terrible thing to
//! type. On the command line rows are addressed by **position**: their 1-based
//! place in the full, unfiltered table.
//!
//! Positions are canonical. A filtered or deduplicated listing still shows each
//! row with its position in the full table, so `skusheet delete 7` hits the
//! same row whatever view was last printed.
//!
//! ## Selector Grammar
//!
//! - **Position**: `N` (e.g. `1`, `42`)
//! - **Range**: `Start-End` (e.g. `2-5`), inclusive, start ≤ end
//! - **Id prefix**: four or more hex digits of the row UUID (e.g. `3f2a`),
//!   must not be all digits, must match exactly one row
//!
//! Resolution keeps the order of first mention and drops repeats.

use crate::error::{Result, SheetError};
use crate::model::{Row, RowId};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

pub const MIN_ID_PREFIX: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    Position(usize),
    Range(usize, usize),
    IdPrefix(String),
}

impl FromStr for RowSelector {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SheetError::Selector("Empty row selector".to_string()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return parse_position(s).map(RowSelector::Position);
        }
        if let Some((start, end)) = s.split_once('-') {
            let is_numeric = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
            if is_numeric(start) && is_numeric(end) {
                let (start, end) = (parse_position(start)?, parse_position(end)?);
                if start > end {
                    return Err(SheetError::Selector(format!(
                        "Invalid range {}: start is after end",
                        s
                    )));
                }
                return Ok(RowSelector::Range(start, end));
            }
        }
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        if hex.len() >= MIN_ID_PREFIX && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(RowSelector::IdPrefix(hex.to_ascii_lowercase()));
        }
        Err(SheetError::Selector(format!("Invalid row selector: {}", s)))
    }
}

fn parse_position(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(SheetError::Selector(format!(
            "Invalid row position {}: positions start at 1",
            s
        ))),
        Ok(n) => Ok(n),
    }
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RowSelector>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

/// A row paired with its canonical 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub position: usize,
    pub row: Row,
}

/// Pair every row with its position in the full table.
pub fn index_rows(rows: &[Row]) -> Vec<DisplayRow> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| DisplayRow {
            position: i + 1,
            row: row.clone(),
        })
        .collect()
}

/// Display rows for a subset of `all`, keeping each row's canonical position.
pub fn display_subset(all: &[Row], subset: &[&Row]) -> Vec<DisplayRow> {
    let positions: HashMap<RowId, usize> =
        all.iter().enumerate().map(|(i, r)| (r.id, i + 1)).collect();
    subset
        .iter()
        .filter_map(|row| {
            positions.get(&row.id).map(|&position| DisplayRow {
                position,
                row: (*row).clone(),
            })
        })
        .collect()
}

/// Resolve selectors against the full table. Fails on the first selector
/// that matches nothing.
pub fn resolve_selectors(rows: &[Row], selectors: &[RowSelector]) -> Result<Vec<RowId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut push = |id: RowId| {
        if seen.insert(id) {
            ids.push(id);
        }
    };

    for selector in selectors {
        match selector {
            RowSelector::Position(n) => push(row_at(rows, *n)?.id),
            RowSelector::Range(start, end) => {
                row_at(rows, *end)?;
                for n in *start..=*end {
                    push(row_at(rows, n)?.id);
                }
            }
            RowSelector::IdPrefix(prefix) => {
                let matches: Vec<&Row> = rows
                    .iter()
                    .filter(|r| r.id.simple().to_string().starts_with(prefix.as_str()))
                    .collect();
                match matches.as_slice() {
                    [row] => push(row.id),
                    [] => {
                        return Err(SheetError::Selector(format!("No row with id {}", prefix)))
                    }
                    _ => {
                        return Err(SheetError::Selector(format!(
                            "Id prefix {} matches {} rows",
                            prefix,
                            matches.len()
                        )))
                    }
                }
            }
        }
    }
    Ok(ids)
}

fn row_at(rows: &[Row], position: usize) -> Result<&Row> {
    position
        .checked_sub(1)
        .and_then(|i| rows.get(i))
        .ok_or_else(|| {
            SheetError::Selector(format!(
                "Row {} not found (table has {} rows)",
                position,
                rows.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::with_values([("商品名称", format!("P{}", i + 1))]))
            .collect()
    }

    #[test]
    fn parses_positions_and_ranges() {
        assert_eq!("3".parse::<RowSelector>().unwrap(), RowSelector::Position(3));
        assert_eq!(
            "2-5".parse::<RowSelector>().unwrap(),
            RowSelector::Range(2, 5)
        );
    }

    #[test]
    fn rejects_zero_and_backwards_ranges() {
        assert!("0".parse::<RowSelector>().is_err());
        assert!("5-2".parse::<RowSelector>().is_err());
        assert!("x".parse::<RowSelector>().is_err());
        assert!("".parse::<RowSelector>().is_err());
    }

    #[test]
    fn parses_id_prefix() {
        assert_eq!(
            "3F2A".parse::<RowSelector>().unwrap(),
            RowSelector::IdPrefix("3f2a".to_string())
        );
        assert!("abc".parse::<RowSelector>().is_err());
    }

    #[test]
    fn resolves_in_mention_order_without_repeats() {
        let table = rows(5);
        let selectors = parse_selectors(&["4", "1-2", "2"]).unwrap();
        let ids = resolve_selectors(&table, &selectors).unwrap();
        assert_eq!(ids, vec![table[3].id, table[0].id, table[1].id]);
    }

    #[test]
    fn out_of_range_fails() {
        let table = rows(2);
        let err = resolve_selectors(&table, &[RowSelector::Position(3)]).unwrap_err();
        assert!(err.to_string().contains("Row 3 not found"));
        assert!(resolve_selectors(&table, &[RowSelector::Range(1, 3)]).is_err());
    }

    #[test]
    fn resolves_unique_id_prefix() {
        let table = rows(3);
        let prefix = table[1].id.simple().to_string()[..8].to_string();
        let ids = resolve_selectors(&table, &[RowSelector::IdPrefix(prefix)]).unwrap();
        assert_eq!(ids, vec![table[1].id]);
    }

    #[test]
    fn subset_keeps_canonical_positions() {
        let table = rows(4);
        let subset = vec![&table[1], &table[3]];
        let display = display_subset(&table, &subset);
        let positions: Vec<_> = display.iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![2, 4]);
    }
}
