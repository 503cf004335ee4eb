use super::helpers::{display_rows, plural, selected_ids, with_siblings};
use crate::columns::Column;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SheetError};
use crate::index::RowSelector;
use crate::store::{RowPatch, RowStore, StorageBackend};

/// Put image URLs into `商品主图1..5` of the selected rows.
///
/// Main images are product-scope, so every sibling sharing a selected row's
/// product code gets the same images. All rows change in one commit.
pub fn run<B: StorageBackend>(
    store: &mut RowStore<B>,
    selectors: &[RowSelector],
    urls: &[String],
) -> Result<CmdResult> {
    let urls: Vec<&str> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();
    if urls.is_empty() {
        return Err(SheetError::InvalidInput("No image URLs given".to_string()));
    }
    let selected = selected_ids(store, selectors)?;

    let ids = with_siblings(store, &selected, Column::MainImage1.name());

    let patches: Vec<RowPatch> = ids
        .iter()
        .map(|id| {
            Column::MAIN_IMAGES
                .iter()
                .zip(&urls)
                .fold(RowPatch::new(*id), |patch, (column, url)| {
                    patch.set(column.name(), *url)
                })
        })
        .collect();
    let updated = store.apply_batch(&patches)?;

    let mut result = CmdResult::default();
    let used = urls.len().min(Column::MAIN_IMAGES.len());
    result.add_message(CmdMessage::success(format!(
        "Set {} on {}",
        plural(used, "image"),
        plural(updated, "row")
    )));
    if urls.len() > used {
        result.add_message(CmdMessage::warning(format!(
            "Only {} main image slots, ignored {} more",
            Column::MAIN_IMAGES.len(),
            plural(urls.len() - used, "URL")
        )));
    }
    Ok(result.with_affected_rows(display_rows(store, &ids)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::parse_selectors;
    use crate::store::memory::fixtures::StoreFixture;

    fn urls(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://img.example/{}.jpg", i)).collect()
    }

    #[test]
    fn images_reach_siblings() {
        let mut store = StoreFixture::new()
            .with_variants("杯子", "CUP", &["红", "蓝"])
            .with_products(&["壶"])
            .store;
        let result = run(&mut store, &parse_selectors(&["1"]).unwrap(), &urls(2)).unwrap();

        let rows = store.as_slice();
        assert_eq!(rows[0].get("商品主图2"), Some("https://img.example/2.jpg"));
        assert_eq!(rows[1].get("商品主图1"), Some("https://img.example/1.jpg"));
        assert_eq!(rows[2].get("商品主图1"), None);
        assert_eq!(result.affected_rows.len(), 2);
    }

    #[test]
    fn extra_urls_are_reported() {
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        let result = run(&mut store, &parse_selectors(&["1"]).unwrap(), &urls(7)).unwrap();
        assert_eq!(store.as_slice()[0].get("商品主图5"), Some("https://img.example/5.jpg"));
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn rejects_empty_url_list() {
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        let err = run(&mut store, &parse_selectors(&["1"]).unwrap(), &[" ".to_string()]);
        assert!(matches!(err, Err(SheetError::InvalidInput(_))));
    }

    #[test]
    fn rejects_empty_selection() {
        let mut store = StoreFixture::new().with_products(&["A"]).store;
        assert!(run(&mut store, &[], &urls(1)).is_err());
    }
}
