use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::store::{RowStore, StorageBackend};
use crate::view::{compute_stats, ViewState};

/// Value histogram of `column` over the rows visible under `view`.
pub fn run<B: StorageBackend>(
    store: &RowStore<B>,
    view: &ViewState,
    column: &str,
) -> Result<CmdResult> {
    let column = column.trim();
    if column.is_empty() {
        return Err(SheetError::InvalidInput("Column name is empty".to_string()));
    }
    let visible = view.visible_rows(store.as_slice());

    let mut result = CmdResult::default();
    result.stats = compute_stats(visible, column);
    if result.stats.is_empty() {
        result.add_message(CmdMessage::info("No rows"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn histogram_over_visible_rows() {
        let store = StoreFixture::new()
            .with_row(&[("色", "红"), ("尺码", "S")])
            .with_row(&[("色", "蓝"), ("尺码", "S")])
            .with_row(&[("色", "红"), ("尺码", "M")])
            .store;

        let all = run(&store, &ViewState::new(), "色").unwrap();
        let pairs: Vec<_> = all.stats.iter().map(|s| (s.value.as_str(), s.count)).collect();
        assert_eq!(pairs, vec![("红", 2), ("蓝", 1)]);

        let mut view = ViewState::new();
        view.set_filter("尺码", ["S"]);
        let filtered = run(&store, &view, "色").unwrap();
        assert_eq!(filtered.stats.iter().map(|s| s.count).sum::<usize>(), 2);
    }
}
