use super::{cell_key, BLANK};
use crate::model::Row;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl ValueCount {
    pub fn is_blank(&self) -> bool {
        self.value == BLANK
    }
}

/// Histogram of canonical values in `column`.
///
/// Sorted by count descending. Equal counts sort by value, except that the
/// blank marker goes after every other value with the same count.
pub fn compute_stats<'a>(rows: impl IntoIterator<Item = &'a Row>, column: &str) -> Vec<ValueCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        *counts.entry(cell_key(row, column)).or_insert(0) += 1;
    }

    let mut stats: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    stats.sort_by(compare);
    stats
}

fn compare(a: &ValueCount, b: &ValueCount) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.is_blank().cmp(&b.is_blank()))
        .then_with(|| a.value.cmp(&b.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| Row::with_values([("色", *v)]))
            .collect()
    }

    fn pairs(stats: &[ValueCount]) -> Vec<(&str, usize)> {
        stats.iter().map(|s| (s.value.as_str(), s.count)).collect()
    }

    #[test]
    fn counts_sorted_descending() {
        let stats = compute_stats(&rows(&["红", "蓝", "红"]), "色");
        assert_eq!(pairs(&stats), vec![("红", 2), ("蓝", 1)]);
    }

    #[test]
    fn ties_break_lexicographically() {
        let stats = compute_stats(&rows(&["b", "a", "c"]), "色");
        assert_eq!(pairs(&stats), vec![("a", 1), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn blank_sorts_last_among_ties() {
        // "(" sorts before ASCII letters, so a plain string sort would put it first.
        let stats = compute_stats(&rows(&["", "b", "  ", "b", "a"]), "色");
        assert_eq!(pairs(&stats), vec![("b", 2), (BLANK, 2), ("a", 1)]);
    }

    #[test]
    fn blank_still_ranks_by_count() {
        let stats = compute_stats(&rows(&["", "", "a"]), "色");
        assert_eq!(pairs(&stats), vec![(BLANK, 2), ("a", 1)]);
    }

    #[test]
    fn counts_partition_rows() {
        let input = rows(&["x", "", "y", "x", " x ", "z", ""]);
        let stats = compute_stats(&input, "色");
        let total: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, input.len());
        assert_eq!(stats[0], ValueCount { value: "x".into(), count: 3 });
    }

    #[test]
    fn missing_column_is_all_blank() {
        let input = rows(&["x", "y"]);
        let stats = compute_stats(&input, "尺码");
        assert_eq!(pairs(&stats), vec![(BLANK, 2)]);
    }

    #[test]
    fn empty_rows_give_empty_stats() {
        assert!(compute_stats(&Vec::<Row>::new(), "色").is_empty());
    }
}
