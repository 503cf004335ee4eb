use super::helpers::{display_rows, plural, selected_ids, writable_column};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::index::RowSelector;
use crate::model::CheckStatus;
use crate::store::{RowPatch, RowStore, StorageBackend};
use crate::sync::resets_verification;

/// Apply the same cell changes to every selected row in one batch.
///
/// Batch changes are row-local: nothing propagates to siblings. Changing a
/// critical column still resets verification.
pub fn run<B: StorageBackend>(
    store: &mut RowStore<B>,
    selectors: &[RowSelector],
    changes: &[(String, String)],
) -> Result<CmdResult> {
    if changes.is_empty() {
        return Err(SheetError::InvalidInput("No changes given".to_string()));
    }
    let ids = selected_ids(store, selectors)?;

    let mut columns = Vec::with_capacity(changes.len());
    for (column, _) in changes {
        columns.push(writable_column(column)?);
    }
    let reset = columns.iter().any(|c| resets_verification(c));

    let patches: Vec<RowPatch> = ids
        .iter()
        .map(|id| {
            let patch = columns
                .iter()
                .zip(changes)
                .fold(RowPatch::new(*id), |patch, (column, (_, value))| {
                    patch.set(*column, value.trim())
                });
            if reset {
                patch.with_status(CheckStatus::Unverified)
            } else {
                patch
            }
        })
        .collect();

    let updated = store.apply_batch(&patches)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated {}",
        plural(updated, "row")
    )));
    Ok(result.with_affected_rows(display_rows(store, &ids)))
}
