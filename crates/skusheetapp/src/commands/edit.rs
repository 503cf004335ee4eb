use super::helpers::{display_rows, plural, selected_ids, writable_column};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowSelector;
use crate::store::{RowStore, StorageBackend};
use crate::sync::resets_verification;

/// Edit one cell. Siblings sharing the relevant code receive the same value.
pub fn run<B: StorageBackend>(
    store: &mut RowStore<B>,
    selector: &RowSelector,
    column: &str,
    value: &str,
) -> Result<CmdResult> {
    let column = writable_column(column)?;
    let ids = selected_ids(store, std::slice::from_ref(selector))?;
    let mut result = CmdResult::default();
    let Some(&id) = ids.first() else {
        return Ok(result);
    };

    let affected = store.edit_cell(id, column, value)?;
    if affected.is_empty() {
        result.add_message(CmdMessage::info("Row no longer exists, nothing changed"));
        return Ok(result);
    }

    let siblings = affected.len() - 1;
    if siblings == 0 {
        result.add_message(CmdMessage::success(format!("Updated {}", column)));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Updated {} on {} (including {})",
            column,
            plural(affected.len(), "row"),
            plural(siblings, "sibling")
        )));
    }
    if resets_verification(column) {
        result.add_message(CmdMessage::info("Verification reset to 未审核"));
    }
    Ok(result.with_affected_rows(display_rows(store, &affected)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CheckStatus;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn product_name_edit_reaches_siblings_and_resets_status() {
        let mut store = StoreFixture::new()
            .with_row(&[("商品编码", "A1"), ("商品名称", "X")])
            .with_row(&[("商品编码", "A1"), ("商品名称", "X")])
            .all_verified()
            .store;

        let result = run(&mut store, &RowSelector::Position(1), "商品名称", "Y").unwrap();

        for row in store.as_slice() {
            assert_eq!(row.product_name(), Some("Y"));
            assert_eq!(row.check_status, CheckStatus::Unverified);
        }
        assert_eq!(result.affected_rows.len(), 2);
        assert!(result.messages[0].content.contains("including 1 sibling"));
    }

    #[test]
    fn sku_field_stays_on_its_row() {
        let mut store = StoreFixture::new()
            .with_variants("杯子", "CUP", &["红", "蓝"])
            .all_verified()
            .store;

        run(&mut store, &RowSelector::Position(2), "价格", "12").unwrap();

        let rows = store.as_slice();
        assert_eq!(rows[0].get("价格"), None);
        assert_eq!(rows[1].get("价格"), Some("12"));
        // price is not a critical column
        assert!(rows[1].is_verified());
    }

    #[test]
    fn unknown_row_is_an_error() {
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        assert!(run(&mut store, &RowSelector::Position(9), "商品名称", "Y").is_err());
    }

    #[test]
    fn status_column_cannot_be_edited() {
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        assert!(run(&mut store, &RowSelector::Position(1), "审核状态", "已审核").is_err());
    }
}
