use super::helpers::{apply_rewrites, display_rows, plural, selected_or_all, unique_values};
use crate::assistant::ProductAssistant;
use crate::columns::Column;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::index::RowSelector;
use crate::store::{RowStore, StorageBackend};
use std::collections::HashMap;

/// Replace product names with assistant-suggested titles.
///
/// Each distinct name is sent once. Sibling rows are renamed with their
/// product, and renamed rows go back to unverified.
pub async fn run<B, A>(
    store: &mut RowStore<B>,
    assistant: &A,
    selectors: &[RowSelector],
) -> Result<CmdResult>
where
    B: StorageBackend,
    A: ProductAssistant + ?Sized,
{
    let ids = selected_or_all(store, selectors)?;
    if ids.is_empty() {
        return Err(SheetError::InvalidInput("No rows to rename".to_string()));
    }
    let column = Column::ProductName.name();
    let names = unique_values(
        store
            .as_slice()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .filter_map(|r| r.get(column)),
    );
    if names.is_empty() {
        return Err(SheetError::InvalidInput(
            "Selected rows have no product names".to_string(),
        ));
    }

    let titles = assistant.rename(&names).await?;
    let rewrites: HashMap<String, String> = titles
        .into_iter()
        .filter(|t| !t.new_name.trim().is_empty() && t.new_name.trim() != t.original.trim())
        .map(|t| (t.original.trim().to_string(), t.new_name.trim().to_string()))
        .collect();

    let changed = apply_rewrites(store, &ids, column, &rewrites)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed {} ({})",
        plural(rewrites.len(), "product"),
        plural(changed.len(), "row")
    )));
    Ok(result.with_affected_rows(display_rows(store, &changed)))
}
