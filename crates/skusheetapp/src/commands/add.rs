use super::helpers::{display_rows, writable_column};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Row;
use crate::store::{RowStore, StorageBackend};

/// Append one row, blank or pre-filled with `(column, value)` pairs.
pub fn run<B: StorageBackend>(
    store: &mut RowStore<B>,
    values: &[(String, String)],
) -> Result<CmdResult> {
    let mut row = Row::new();
    for (column, value) in values {
        row.set(writable_column(column)?, value.trim());
    }

    let ids = store.add(vec![row])?;
    let affected = display_rows(store, &ids);
    let mut result = CmdResult::default();
    if let Some(added) = affected.first() {
        result.add_message(CmdMessage::success(format!("Row {} added", added.position)));
    }
    Ok(result.with_affected_rows(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CheckStatus;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_blank_row_at_the_end() {
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        let result = run(&mut store, &[]).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.as_slice()[1].is_blank());
        assert_eq!(result.affected_rows[0].position, 2);
    }

    #[test]
    fn prefilled_row_is_unverified() {
        let mut store = InMemoryStore::new();
        run(
            &mut store,
            &[
                ("商品名称".to_string(), " 杯子 ".to_string()),
                ("色".to_string(), "红".to_string()),
            ],
        )
        .unwrap();
        let row = &store.as_slice()[0];
        assert_eq!(row.product_name(), Some("杯子"));
        assert_eq!(row.get("色"), Some("红"));
        assert_eq!(row.check_status, CheckStatus::Unverified);
    }

    #[test]
    fn status_column_is_rejected() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, &[("审核状态".to_string(), "已审核".to_string())]);
        assert!(err.is_err());
        assert!(store.is_empty());
    }
}
