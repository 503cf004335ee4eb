//! # Grids
//!
//! A grid is the plain 2-D cell array that spreadsheet files turn into.
//! This module converts between grids and rows and does the file I/O.
//!
//! - [`import`]: grid to rows. Finds the header row and maps columns by name.
//! - [`export`]: rows to grid. Instructions row, header row, numeric coercion,
//!   output file name.
//! - [`file`]: reading `.csv` and workbook files into grids, writing grids as
//!   UTF-8 CSV.
//!
//! Import and export never touch the store. Committing parsed rows and
//! choosing which rows to export is the command layer's job.

pub mod export;
pub mod file;
pub mod import;

pub use export::{build_export_grid, export_file_name, ExportCell};
pub use file::{read_grid, write_csv};
pub use import::{find_header_row, parse_grid};

/// Raw cell text as read from a file, row-major.
pub type Grid = Vec<Vec<String>>;
