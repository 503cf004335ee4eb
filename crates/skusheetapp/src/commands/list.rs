use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::display_subset;
use crate::store::{RowStore, StorageBackend};
use crate::view::ViewState;

/// The rows visible under `view`, each with its canonical position.
pub fn run<B: StorageBackend>(store: &RowStore<B>, view: &ViewState) -> Result<CmdResult> {
    let rows = store.as_slice();
    let visible = view.visible_rows(rows);
    Ok(CmdResult::default().with_listed_rows(display_subset(rows, &visible)))
}
