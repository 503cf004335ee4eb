use super::helpers::plural;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RowStore, StorageBackend};

/// Drop every row and the saved snapshot.
pub fn run<B: StorageBackend>(store: &mut RowStore<B>) -> Result<CmdResult> {
    let count = store.len();
    store.reset()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {}",
        plural(count, "row")
    )));
    Ok(result)
}
