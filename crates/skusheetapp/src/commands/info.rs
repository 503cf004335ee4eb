use crate::commands::{CmdResult, TableSummary};
use crate::error::Result;
use crate::store::{RowStore, StorageBackend};
use std::collections::HashSet;

pub fn run<B: StorageBackend>(store: &RowStore<B>) -> Result<CmdResult> {
    let rows = store.as_slice();
    let products: HashSet<&str> = rows
        .iter()
        .filter_map(|r| r.product_code().or(r.product_name()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut result = CmdResult::default();
    result.summary = Some(TableSummary {
        rows: rows.len(),
        verified: rows.iter().filter(|r| r.is_verified()).count(),
        products: products.len(),
        saved_at: store.saved_at()?,
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn counts_rows_products_and_verified() {
        let mut store = StoreFixture::new()
            .with_variants("杯子", "CUP", &["红", "蓝"])
            .with_products(&["壶"])
            .store;
        let first = store.as_slice()[0].id;
        store
            .set_status(&[first], crate::model::CheckStatus::Verified)
            .unwrap();

        let summary = run(&store).unwrap().summary.unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.products, 2);
        assert_eq!(summary.verified, 1);
        assert!(summary.saved_at.is_some());
    }

    #[test]
    fn fresh_store_was_never_saved() {
        let store = InMemoryStore::new();
        let summary = run(&store).unwrap().summary.unwrap();
        assert_eq!(summary.rows, 0);
        assert!(summary.saved_at.is_none());
    }
}
