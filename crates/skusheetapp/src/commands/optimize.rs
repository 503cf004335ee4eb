use super::helpers::{apply_rewrites, display_rows, plural, selected_or_all, unique_values};
use crate::assistant::ProductAssistant;
use crate::columns::Column;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::index::RowSelector;
use crate::store::{RowStore, StorageBackend};
use std::collections::HashMap;

/// Replace SKU specs with assistant-normalized ones. Each distinct spec is
/// sent once; changed rows go back to unverified.
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
    let column = Column::SkuSpec.name();
    let specs = unique_values(
        store
            .as_slice()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .filter_map(|r| r.get(column)),
    );
    if specs.is_empty() {
        return Err(SheetError::InvalidInput("No SKU specs to optimize".to_string()));
    }

    let optimized = assistant.optimize_specs(&specs).await?;
    let rewrites: HashMap<String, String> = optimized
        .into_iter()
        .filter(|o| !o.optimized.trim().is_empty() && o.optimized.trim() != o.original.trim())
        .map(|o| (o.original.trim().to_string(), o.optimized.trim().to_string()))
        .collect();

    let changed = apply_rewrites(store, &ids, column, &rewrites)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Optimized {}",
        plural(changed.len(), "spec")
    )));
    if rewrites.len() < specs.len() {
        result.add_message(CmdMessage::info(format!(
            "{} left as they were",
            plural(specs.len() - rewrites.len(), "spec")
        )));
    }
    Ok(result.with_affected_rows(display_rows(store, &changed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::mock::ScriptedAssistant;
    use crate::store::memory::fixtures::StoreFixture;

    #[tokio::test]
    async fn dedups_specs_and_rewrites_rows() {
        let assistant = ScriptedAssistant::new()
            .with_specs(&[("颜色:红色;尺码:XL", "红色/XL"), ("蓝", "蓝")]);
        let mut store = StoreFixture::new()
            .with_row(&[("商品名称", "A"), ("SKU规格", "颜色:红色;尺码:XL")])
            .with_row(&[("商品名称", "B"), ("SKU规格", "颜色:红色;尺码:XL")])
            .with_row(&[("商品名称", "C"), ("SKU规格", "蓝")])
            .all_verified()
            .store;

        let result = run(&mut store, &assistant, &[]).await.unwrap();

        assert_eq!(
            assistant.calls(),
            vec![vec!["颜色:红色;尺码:XL".to_string(), "蓝".to_string()]]
        );
        let rows = store.as_slice();
        assert_eq!(rows[0].get("SKU规格"), Some("红色/XL"));
        assert_eq!(rows[1].get("SKU规格"), Some("红色/XL"));
        assert!(!rows[1].is_verified());
        // unchanged spec keeps its verification
        assert!(rows[2].is_verified());
        assert_eq!(result.affected_rows.len(), 2);
    }

    #[tokio::test]
    async fn rows_without_specs_are_rejected() {
        let assistant = ScriptedAssistant::new();
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        assert!(run(&mut store, &assistant, &[]).await.is_err());
        assert!(assistant.calls().is_empty());
    }
}
