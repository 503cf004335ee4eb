use super::canonicalize;
use super::filter::{compute_visible_rows, FilterState, UniqueColumns};
use super::stats::compute_stats;
use crate::model::Row;
use std::collections::BTreeSet;

/// Filter and unique-column selections for one table view.
///
/// A column is never both filtered and in unique mode: entering one mode
/// leaves the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    filters: FilterState,
    unique: UniqueColumns,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn unique_columns(&self) -> &UniqueColumns {
        &self.unique
    }

    pub fn is_unique(&self, column: &str) -> bool {
        self.unique.contains(column)
    }

    pub fn is_filtered(&self, column: &str) -> bool {
        self.filters.contains_key(column)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.unique.is_empty()
    }

    /// Flip `column` in or out of unique mode. Returns true when the column
    /// is now in unique mode.
    pub fn toggle_unique(&mut self, column: &str) -> bool {
        if self.unique.remove(column) {
            return false;
        }
        self.filters.remove(column);
        self.unique.insert(column.to_string());
        true
    }

    /// Start editing the allow-set of `column`.
    pub fn open_filter(&self, column: &str, rows: &[Row]) -> FilterDraft {
        let options: Vec<String> = compute_stats(rows, column)
            .into_iter()
            .map(|s| s.value)
            .collect();
        let selected = match self.filters.get(column) {
            Some(allowed) => allowed.clone(),
            None => options.iter().cloned().collect(),
        };
        FilterDraft {
            column: column.to_string(),
            options,
            selected,
        }
    }

    /// Commit a draft. Selecting every option is the same as no filter.
    pub fn apply_filter(&mut self, draft: FilterDraft) {
        if draft.is_all_selected() {
            self.filters.remove(&draft.column);
            return;
        }
        self.unique.remove(&draft.column);
        self.filters.insert(draft.column, draft.selected);
    }

    /// Set an allow-set directly, as the CLI `--filter` flag does. Values are
    /// canonicalized, so an empty value selects blank cells.
    pub fn set_filter<I, S>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.unique.remove(column);
        let allowed = values
            .into_iter()
            .map(|v| canonicalize(Some(v.as_ref())))
            .collect();
        self.filters.insert(column.to_string(), allowed);
    }

    pub fn clear_filter(&mut self, column: &str) {
        self.filters.remove(column);
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
        self.unique.clear();
    }

    pub fn visible_rows<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        compute_visible_rows(rows, &self.filters, &self.unique)
    }
}

/// The temporary selection while an allow-set is being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    pub column: String,
    /// Every canonical value present in the column, most frequent first.
    pub options: Vec<String>,
    pub selected: BTreeSet<String>,
}

impl FilterDraft {
    pub fn toggle(&mut self, value: &str) {
        if !self.selected.remove(value) {
            self.selected.insert(value.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    pub fn is_all_selected(&self) -> bool {
        self.options.iter().all(|o| self.selected.contains(o))
    }
}
