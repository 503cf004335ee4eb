//! # Table View
//!
//! Everything the operator sees is derived from the row list on demand:
//!
//! - [`stats::compute_stats`]: value histogram of one column.
//! - [`filter::compute_visible_rows`]: rows left after the active allow-sets
//!   and the unique-column dedup pass.
//! - [`state::ViewState`]: the filter and unique-column selections themselves.
//!
//! Nothing here is cached. Every call recomputes from the slice it is given,
//! which keeps the view consistent with whatever snapshot the store handed out.
//!
//! ## Canonical Values
//!
//! Filtering, counting and dedup all compare cells by the same canonical form:
//! the trimmed cell text, with missing and whitespace-only cells mapped to
//! [`BLANK`].

pub mod filter;
pub mod state;
pub mod stats;

pub use filter::{compute_visible_rows, FilterState, UniqueColumns};
pub use state::{FilterDraft, ViewState};
pub use stats::{compute_stats, ValueCount};

use crate::model::Row;

/// Stand-in for an empty cell in stats, allow-sets and dedup.
pub const BLANK: &str = "(空白)";

pub fn canonicalize(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => BLANK.to_string(),
    }
}

/// Canonical value of `column` in `row`.
pub fn cell_key(row: &Row, column: &str) -> String {
    canonicalize(row.get(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_whitespace_cells_are_blank() {
        assert_eq!(canonicalize(None), BLANK);
        assert_eq!(canonicalize(Some("")), BLANK);
        assert_eq!(canonicalize(Some("  \t")), BLANK);
    }

    #[test]
    fn values_are_trimmed() {
        assert_eq!(canonicalize(Some(" 红 ")), "红");
    }
}
