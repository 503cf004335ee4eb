use super::helpers::plural;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::grid::{build_export_grid, export_file_name, write_csv};
use crate::store::{RowStore, StorageBackend};
use crate::view::ViewState;
use std::path::Path;
use tracing::info;

/// Write the visible rows to `<out_dir>/<first product name>.csv`.
pub fn run<B: StorageBackend>(
    store: &RowStore<B>,
    view: &ViewState,
    out_dir: &Path,
) -> Result<CmdResult> {
    let visible = view.visible_rows(store.as_slice());
    if visible.is_empty() {
        return Err(SheetError::InvalidInput("No rows to export".to_string()));
    }

    let grid = build_export_grid(&visible);
    let path = out_dir.join(export_file_name(&visible));
    write_csv(&path, &grid)?;
    info!(path = %path.display(), rows = visible.len(), "export written");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        plural(visible.len(), "row"),
        path.display()
    )));
    result.output_path = Some(path);
    Ok(result)
}
