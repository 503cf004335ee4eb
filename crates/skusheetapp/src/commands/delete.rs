use super::helpers::{display_rows, plural, selected_ids};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowSelector;
use crate::store::{RowStore, StorageBackend};

/// Remove the selected rows. Removal is whole-row and permanent.
pub fn run<B: StorageBackend>(
    store: &mut RowStore<B>,
    selectors: &[RowSelector],
) -> Result<CmdResult> {
    let ids = selected_ids(store, selectors)?;
    let affected = display_rows(store, &ids);
    let removed = store.remove(&ids)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {}",
        plural(removed, "row")
    )));
    Ok(result.with_affected_rows(affected))
}
