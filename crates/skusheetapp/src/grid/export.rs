use crate::columns::{is_numeric, Column, STATUS_COLUMN};
use crate::model::Row;
use std::collections::BTreeSet;
use std::fmt;

/// First line of every exported sheet. Import skips it while looking for the
/// header row.
pub const INSTRUCTIONS: &str =
    "填写说明：商品名称、价格为必填项；同一商品的多个SKU请填写相同的商品编码；审核状态列仅供参考，导入时忽略";

pub const FALLBACK_FILE_STEM: &str = "商品导出";
pub const MAX_FILE_STEM_CHARS: usize = 100;
pub const EXPORT_EXTENSION: &str = "csv";

#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Text(String),
    Number(f64),
}

impl ExportCell {
    /// Numeric columns become numbers when the trimmed text parses as one.
    fn for_column(column: &str, value: Option<&str>) -> Self {
        let text = value.unwrap_or_default();
        if is_numeric(column) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if let Ok(number) = trimmed.parse::<f64>() {
                    if number.is_finite() {
                        return ExportCell::Number(number);
                    }
                }
            }
        }
        ExportCell::Text(text.to_string())
    }
}

impl fmt::Display for ExportCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportCell::Text(text) => f.write_str(text),
            ExportCell::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Header for an export of `rows`: the status column, every template column,
/// then any extension columns in name order.
pub fn export_header(rows: &[&Row]) -> Vec<String> {
    let extra: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.extra.keys().map(String::as_str))
        .collect();

    let mut header = vec![STATUS_COLUMN.to_string()];
    header.extend(Column::all().map(|c| c.name().to_string()));
    header.extend(extra.into_iter().map(str::to_string));
    header
}

/// Instructions row, header row, then one line per row in the given order.
pub fn build_export_grid(rows: &[&Row]) -> Vec<Vec<ExportCell>> {
    let header = export_header(rows);
    let mut grid = Vec::with_capacity(rows.len() + 2);
    grid.push(vec![ExportCell::Text(INSTRUCTIONS.to_string())]);
    grid.push(header.iter().cloned().map(ExportCell::Text).collect());

    for row in rows {
        let line = header
            .iter()
            .map(|name| {
                if name == STATUS_COLUMN {
                    ExportCell::Text(row.check_status.label().to_string())
                } else {
                    ExportCell::for_column(name, row.get(name))
                }
            })
            .collect();
        grid.push(line);
    }
    grid
}

/// File name derived from the first row's product name.
pub fn export_file_name(rows: &[&Row]) -> String {
    let stem = rows
        .first()
        .and_then(|row| row.product_name())
        .map(sanitize_file_stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_STEM.to_string());
    format!("{}.{}", stem, EXPORT_EXTENSION)
}

fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control())
        .collect();
    cleaned.trim().chars().take(MAX_FILE_STEM_CHARS).collect()
}
