//! # Synchronization Engine
//!
//! Editing a single cell may have to touch several rows. A product with three
//! variants is three rows, each repeating the product name, images and so on;
//! editing the name on one variant must rewrite it on the other two, or the
//! upload ends up with three different products.
//!
//! ## Propagation Rule
//!
//! Given a source row and a column:
//!
//! 1. Classify the column ([`crate::columns::scope`]).
//! 2. Product scope → every row whose product code equals the source's.
//!    SKU scope → every row whose sku code equals the source's.
//! 3. Codes are compared trimmed, and an empty code matches nothing, not even
//!    another empty code. A row with no code is edited alone.
//!
//! ## Verification Reset
//!
//! Writing to `商品名称` or `SKU规格` sets every touched row back to
//! `Unverified`. Other columns leave the status alone.
//!
//! The codes are read from the source row *before* the edit, so editing the
//! product code column itself fans out to the old siblings and leaves them
//! still grouped under the new code.

use std::collections::HashSet;

use tracing::debug;

use crate::columns::{is_critical, scope, Column, FieldScope};
use crate::model::{CheckStatus, Row, RowId};

/// Two identity codes match when both are non-empty after trimming and equal.
pub fn codes_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) => !a.is_empty() && a == b,
        _ => false,
    }
}

/// Whether writing to `column` invalidates a prior verification.
pub fn resets_verification(column: &str) -> bool {
    is_critical(column)
}

/// The identity column that groups rows for edits to `column`.
pub fn identity_column(column: &str) -> Column {
    match scope(column) {
        FieldScope::Product => Column::ProductCode,
        FieldScope::Sku => Column::SkuCode,
    }
}

/// Ids of every row that must receive an edit of `column` made on `source`.
///
/// Returns `None` when the source row does not exist. The source itself is
/// always part of the set.
pub fn propagation_set(rows: &[Row], source: RowId, column: &str) -> Option<HashSet<RowId>> {
    let source_row = rows.iter().find(|r| r.id == source)?;
    let identity = identity_column(column);
    let source_code = source_row.value(identity);

    let targets = rows
        .iter()
        .filter(|r| r.id == source || codes_match(source_code, r.value(identity)))
        .map(|r| r.id)
        .collect();
    Some(targets)
}

/// Result of applying one cell edit to a row list.
#[derive(Debug)]
pub struct EditOutcome {
    /// The full row list after the edit
    pub rows: Vec<Row>,
    /// Ids of the rows that received the value, in table order
    pub affected: Vec<RowId>,
}

/// Apply `column = value` to the source row and all its siblings.
///
/// Returns `None` when the source row does not exist (the edit is dropped).
pub fn apply_edit(rows: &[Row], source: RowId, column: &str, value: &str) -> Option<EditOutcome> {
    let targets = propagation_set(rows, source, column)?;
    let reset = resets_verification(column);

    let mut affected = Vec::with_capacity(targets.len());
    let rows = rows
        .iter()
        .map(|row| {
            if !targets.contains(&row.id) {
                return row.clone();
            }
            let mut row = row.clone();
            row.set(column, value);
            if reset {
                row.check_status = CheckStatus::Unverified;
            }
            affected.push(row.id);
            row
        })
        .collect();

    debug!(column, affected = affected.len(), "cell edit propagated");
    Some(EditOutcome { rows, affected })
}
