use super::Grid;
use crate::error::{Result, SheetError};
use calamine::{open_workbook_auto, Reader};
use csv::{ReaderBuilder, WriterBuilder};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &str = "\u{feff}";

pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read the first sheet of a spreadsheet file, or a CSV file, into a grid.
pub fn read_grid(path: &Path) -> Result<Grid> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let grid = match extension.as_str() {
        "csv" => read_csv(path)?,
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => read_workbook(path)?,
        _ => return Err(SheetError::UnsupportedFile(path.display().to_string())),
    };
    debug!(path = %path.display(), lines = grid.len(), "grid read");
    Ok(grid)
}

fn read_csv(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path)?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

fn read_workbook(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SheetError::Workbook(format!("{}: {}", path.display(), e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::Workbook(format!("{}: no worksheet", path.display())))?
        .map_err(|e| SheetError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

/// Write a grid as UTF-8 CSV with a byte-order mark, so spreadsheet programs
/// pick the right encoding. Lines may differ in length.
pub fn write_csv<T: Display>(path: &Path, grid: &[Vec<T>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM.as_bytes())?;

    let mut writer = WriterBuilder::new().flexible(true).from_writer(file);
    for line in grid {
        writer.write_record(line.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    debug!(path = %path.display(), lines = grid.len(), "grid written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_round_trip_keeps_ragged_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let grid = vec![
            vec!["说明".to_string()],
            vec!["商品名称".to_string(), "价格".to_string()],
            vec!["杯子, 大号".to_string(), "9.5".to_string()],
        ];
        write_csv(&path, &grid).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM.as_bytes()));

        let back = read_grid(&path).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn extension_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("IN.CSV");
        fs::write(&path, "商品名称,价格\nA,1\n").unwrap();
        let grid = read_grid(&path).unwrap();
        assert_eq!(grid[1], vec!["A", "1"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "x").unwrap();
        assert!(matches!(
            read_grid(&path),
            Err(SheetError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn broken_workbook_is_a_workbook_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, "not a zip").unwrap();
        assert!(matches!(read_grid(&path), Err(SheetError::Workbook(_))));
    }
}
