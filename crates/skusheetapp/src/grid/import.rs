use crate::columns::{required_names, STATUS_COLUMN};
use crate::error::{Result, SheetError};
use crate::model::Row;
use tracing::{info, warn};

/// Only the first rows are searched for the header; anything further down is
/// data.
pub const HEADER_SCAN_LIMIT: usize = 10;

/// Index of the first row, within [`HEADER_SCAN_LIMIT`], that contains every
/// required column name as a whole cell.
///
/// Cells are compared after trimming surrounding whitespace, so ` 价格 `
/// marks a header but `价格(元)` does not.
pub fn find_header_row(grid: &[Vec<String>]) -> Option<usize> {
    let required: Vec<&str> = required_names().collect();
    grid.iter().take(HEADER_SCAN_LIMIT).position(|row| {
        required
            .iter()
            .all(|name| row.iter().any(|cell| cell.trim() == *name))
    })
}

/// Turn a raw grid into fresh, unverified rows.
///
/// Fails with [`SheetError::NoValidData`] when no data row survives, so the
/// caller never commits an empty import.
pub fn parse_grid(grid: &[Vec<String>]) -> Result<Vec<Row>> {
    let header_index = match find_header_row(grid) {
        Some(index) => index,
        None => {
            warn!(
                scanned = grid.len().min(HEADER_SCAN_LIMIT),
                "no header row with the required columns, using the first row"
            );
            0
        }
    };
    let Some(header) = grid.get(header_index) else {
        return Err(SheetError::NoValidData);
    };
    let mapping = header_mapping(header);

    let rows: Vec<Row> = grid
        .iter()
        .skip(header_index + 1)
        .filter(|cells| !is_blank_line(cells))
        .map(|cells| {
            let mut row = Row::new();
            for (name, index) in &mapping {
                if let Some(value) = cells.get(*index) {
                    row.set(name, value.trim());
                }
            }
            row
        })
        .collect();

    if rows.is_empty() {
        return Err(SheetError::NoValidData);
    }
    info!(header_row = header_index, columns = mapping.len(), rows = rows.len(), "grid parsed");
    Ok(rows)
}

fn header_mapping(header: &[String]) -> Vec<(String, usize)> {
    header
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            let name = cell.trim();
            if name.is_empty() || name == STATUS_COLUMN {
                None
            } else {
                Some((name.to_string(), index))
            }
        })
        .collect()
}

fn is_blank_line(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;
    use crate::model::CheckStatus;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn finds_header_below_instructions() {
        let g = grid(&[
            &["填写说明"],
            &[""],
            &["商品名称", "备注"],
            &["审核状态", "商品名称", "价格"],
            &["", "保温杯", "39"],
        ]);
        assert_eq!(find_header_row(&g), Some(3));

        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name(), Some("保温杯"));
        assert_eq!(rows[0].get("价格"), Some("39"));
    }

    #[test]
    fn header_cells_match_after_trimming() {
        let g = grid(&[&[" 商品名称 ", "价格"], &["A", "1"]]);
        assert_eq!(find_header_row(&g), Some(0));
    }

    #[test]
    fn header_beyond_scan_window_is_not_found() {
        let mut g = vec![vec!["x".to_string()]; HEADER_SCAN_LIMIT];
        g.push(vec!["商品名称".to_string(), "价格".to_string()]);
        assert_eq!(find_header_row(&g), None);
    }

    #[test]
    fn falls_back_to_first_row() {
        let g = grid(&[&["名称", "色"], &["杯子", "红"]]);
        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("名称"), Some("杯子"));
        assert_eq!(rows[0].get("色"), Some("红"));
    }

    #[test]
    fn five_columns_three_rows() {
        let g = grid(&[
            &["商品名称", "价格", "SKU规格", "库存", "色"],
            &["A", "10", "大", "5", "红"],
            &["", "", "", "", ""],
            &["B", "20", "中", "6", "蓝"],
            &["C", "30", "小", "7", "绿"],
        ]);
        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows.len(), 3);

        for row in &rows {
            assert_eq!(row.column_names().count(), 5);
            assert_eq!(row.check_status, CheckStatus::Unverified);
            let blank_schema = Column::all().filter(|c| row.value(*c).is_none()).count();
            assert_eq!(blank_schema, 28);
        }
        assert_eq!(rows[2].get("色"), Some("绿"));
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[test]
    fn five_schema_columns_leave_rest_blank() {
        let g = grid(&[
            &["商品名称", "价格", "SKU规格", "库存", "商品编码"],
            &["A", "10", "大", "5", "P1"],
            &["B", "20", "中", "6", "P2"],
            &["C", "30", "小", "7", "P3"],
        ]);
        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            let populated = Column::all().filter(|c| row.value(*c).is_some()).count();
            let blank = Column::all().filter(|c| row.value(*c).is_none()).count();
            assert_eq!(populated, 5);
            assert_eq!(blank, 27);
        }
    }

    #[test]
    fn short_rows_leave_missing_cells_blank() {
        let g = grid(&[&["商品名称", "价格", "备注"], &["A"]]);
        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows[0].product_name(), Some("A"));
        assert_eq!(rows[0].get("价格"), None);
        assert_eq!(rows[0].get("备注"), None);
    }

    #[test]
    fn status_column_is_not_imported() {
        let g = grid(&[&["审核状态", "商品名称", "价格"], &["已审核", "A", "1"]]);
        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows[0].get("审核状态"), None);
        assert_eq!(rows[0].check_status, CheckStatus::Unverified);
    }

    #[test]
    fn blank_header_cells_are_skipped() {
        let g = grid(&[&["商品名称", "", "价格"], &["A", "ignored", "1"]]);
        let rows = parse_grid(&g).unwrap();
        assert_eq!(rows[0].column_names().count(), 2);
    }

    #[test]
    fn header_only_is_no_valid_data() {
        let g = grid(&[&["商品名称", "价格"], &["  ", ""]]);
        assert!(matches!(parse_grid(&g), Err(SheetError::NoValidData)));
    }

    #[test]
    fn empty_grid_is_no_valid_data() {
        assert!(matches!(parse_grid(&[]), Err(SheetError::NoValidData)));
    }
}
