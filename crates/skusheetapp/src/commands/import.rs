use super::helpers::{display_rows, plural};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::grid::{find_header_row, parse_grid, read_grid};
use crate::store::{RowStore, StorageBackend};
use std::path::Path;
use tracing::info;

/// Append the rows of a spreadsheet file.
///
/// Nothing is committed when the file cannot be read or holds no data rows.
pub fn run<B: StorageBackend>(store: &mut RowStore<B>, path: &Path) -> Result<CmdResult> {
    let grid = read_grid(path)?;
    let header_found = find_header_row(&grid).is_some();
    let rows = parse_grid(&grid)?;

    let ids = store.add(rows)?;
    info!(path = %path.display(), rows = ids.len(), "import committed");

    let mut result = CmdResult::default();
    if !header_found {
        result.add_message(CmdMessage::warning(
            "No header row with 商品名称 and 价格 found, used the first row as header",
        ));
    }
    result.add_message(CmdMessage::success(format!(
        "Imported {} from {}",
        plural(ids.len(), "row"),
        path.display()
    )));
    Ok(result.with_affected_rows(display_rows(store, &ids)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::store::memory::fixtures::StoreFixture;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn imports_csv_after_existing_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "说明\n商品名称,价格,色\nA,1,红\nB,2,蓝\n").unwrap();

        let mut store = StoreFixture::new().with_products(&["old"]).store;
        let result = run(&mut store, &path).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.as_slice()[2].get("色"), Some("蓝"));
        assert_eq!(result.affected_rows[0].position, 2);
        assert!(!result.has_level(crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn headerless_import_warns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "名称,色\nA,红\n").unwrap();

        let mut store = StoreFixture::new().store;
        let result = run(&mut store, &path).unwrap();
        assert!(result.has_level(crate::commands::MessageLevel::Warning));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_sheet_commits_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "商品名称,价格\n,\n").unwrap();

        let mut store = StoreFixture::new().with_products(&["old"]).store;
        let revision = store.revision();
        assert!(matches!(run(&mut store, &path), Err(SheetError::NoValidData)));
        assert_eq!(store.revision(), revision);
        assert_eq!(store.len(), 1);
    }
}
