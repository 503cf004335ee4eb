use super::helpers::{display_rows, plural};
use crate::assistant::{merge_extracted, CodeGenerator, ProductAssistant};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::store::{RowStore, StorageBackend};

/// Extract products from free text and append them as new rows.
pub async fn run<B, A>(store: &mut RowStore<B>, assistant: &A, text: &str) -> Result<CmdResult>
where
    B: StorageBackend,
    A: ProductAssistant + ?Sized,
{
    if text.trim().is_empty() {
        return Err(SheetError::InvalidInput("No text to extract from".to_string()));
    }

    let records = assistant.extract(text).await?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::warning("The assistant found no products"));
        return Ok(result);
    }

    let mut codes = CodeGenerator::now();
    let outcome = merge_extracted(store.as_slice(), records, &mut codes);
    let ids = store.add(outcome.rows)?;

    result.add_message(CmdMessage::success(format!(
        "Extracted {}",
        plural(ids.len(), "row")
    )));
    if outcome.skipped > 0 {
        result.add_message(CmdMessage::info(format!(
            "Skipped {} already in the table",
            plural(outcome.skipped, "duplicate")
        )));
    }
    Ok(result.with_affected_rows(display_rows(store, &ids)))
}
