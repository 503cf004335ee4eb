use crate::columns::STATUS_COLUMN;
use crate::error::{Result, SheetError};
use crate::index::{display_subset, resolve_selectors, DisplayRow, RowSelector};
use crate::model::{CheckStatus, Row, RowId};
use crate::store::{RowPatch, RowStore, StorageBackend};
use crate::sync::propagation_set;
use std::collections::{HashMap, HashSet};

/// Resolve selectors, refusing an empty selection.
pub fn selected_ids<B: StorageBackend>(
    store: &RowStore<B>,
    selectors: &[RowSelector],
) -> Result<Vec<RowId>> {
    if selectors.is_empty() {
        return Err(SheetError::InvalidInput("No rows selected".to_string()));
    }
    resolve_selectors(store.as_slice(), selectors)
}

/// Current display rows for `ids`, in table order.
pub fn display_rows<B: StorageBackend>(store: &RowStore<B>, ids: &[RowId]) -> Vec<DisplayRow> {
    let wanted: HashSet<&RowId> = ids.iter().collect();
    let rows = store.as_slice();
    let subset: Vec<&Row> = rows.iter().filter(|r| wanted.contains(&r.id)).collect();
    display_subset(rows, &subset)
}

/// `ids` plus every row an edit of `column` would propagate to, in table
/// order.
pub fn with_siblings<B: StorageBackend>(
    store: &RowStore<B>,
    ids: &[RowId],
    column: &str,
) -> Vec<RowId> {
    let rows = store.as_slice();
    let mut targets: HashSet<RowId> = HashSet::new();
    for id in ids {
        if let Some(set) = propagation_set(rows, *id, column) {
            targets.extend(set);
        }
    }
    rows.iter()
        .map(|r| r.id)
        .filter(|id| targets.contains(id))
        .collect()
}

/// Selected rows, or every row when nothing is selected.
pub fn selected_or_all<B: StorageBackend>(
    store: &RowStore<B>,
    selectors: &[RowSelector],
) -> Result<Vec<RowId>> {
    if selectors.is_empty() {
        Ok(store.as_slice().iter().map(|r| r.id).collect())
    } else {
        resolve_selectors(store.as_slice(), selectors)
    }
}

/// Replace values of `column` on the target rows (and their siblings)
/// according to `rewrites`, keyed by the trimmed old value. Rewritten rows
/// go back to unverified. Returns the ids of rows that changed.
pub fn apply_rewrites<B: StorageBackend>(
    store: &mut RowStore<B>,
    ids: &[RowId],
    column: &str,
    rewrites: &HashMap<String, String>,
) -> Result<Vec<RowId>> {
    let targets = with_siblings(store, ids, column);
    let wanted: HashSet<&RowId> = targets.iter().collect();

    let patches: Vec<RowPatch> = store
        .as_slice()
        .iter()
        .filter(|row| wanted.contains(&row.id))
        .filter_map(|row| {
            let old = row.get(column)?.trim();
            let new = rewrites.get(old)?;
            Some(
                RowPatch::new(row.id)
                    .set(column, new.as_str())
                    .with_status(CheckStatus::Unverified),
            )
        })
        .collect();

    store.apply_batch(&patches)?;
    Ok(patches.iter().map(|p| p.id).collect())
}

/// Check that a column name can be written to.
pub fn writable_column(column: &str) -> Result<&str> {
    let column = column.trim();
    if column.is_empty() {
        return Err(SheetError::InvalidInput("Column name is empty".to_string()));
    }
    if column == STATUS_COLUMN {
        return Err(SheetError::InvalidInput(format!(
            "{} is set with verify/unverify, not as a cell",
            STATUS_COLUMN
        )));
    }
    Ok(column)
}

/// Distinct non-blank values in order of first appearance.
pub fn unique_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
