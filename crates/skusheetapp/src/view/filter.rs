use super::cell_key;
use crate::model::Row;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Column name to allow-set of canonical values. A column without an entry
/// is unrestricted.
pub type FilterState = BTreeMap<String, BTreeSet<String>>;

/// Columns in dedup mode.
pub type UniqueColumns = BTreeSet<String>;

/// Rows that pass every allow-set, then survive the unique-column dedup.
///
/// Input order is preserved. The dedup pass is joint across unique columns:
/// a row is dropped as soon as any of its unique-column values was seen
/// before, and a kept row marks its value as seen in every unique column.
pub fn compute_visible_rows<'a>(
    rows: &'a [Row],
    filters: &FilterState,
    unique: &UniqueColumns,
) -> Vec<&'a Row> {
    let filtered = rows.iter().filter(|row| passes(row, filters));
    if unique.is_empty() {
        return filtered.collect();
    }

    let mut seen: Vec<(&str, HashSet<String>)> =
        unique.iter().map(|c| (c.as_str(), HashSet::new())).collect();

    filtered
        .filter(|row| {
            let keys: Vec<String> = seen.iter().map(|(col, _)| cell_key(row, col)).collect();
            let duplicate = seen
                .iter()
                .zip(&keys)
                .any(|((_, values), key)| values.contains(key));
            if duplicate {
                return false;
            }
            for ((_, values), key) in seen.iter_mut().zip(keys) {
                values.insert(key);
            }
            true
        })
        .collect()
}

fn passes(row: &Row, filters: &FilterState) -> bool {
    filters
        .iter()
        .all(|(column, allowed)| allowed.contains(&cell_key(row, column)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::BLANK;

    fn color_rows(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| Row::with_values([("色", *v)]))
            .collect()
    }

    fn filter_of(column: &str, values: &[&str]) -> FilterState {
        let mut filters = FilterState::new();
        filters.insert(
            column.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        filters
    }

    fn unique_of(columns: &[&str]) -> UniqueColumns {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn no_filters_shows_everything() {
        let rows = color_rows(&["红", "蓝"]);
        let visible = compute_visible_rows(&rows, &FilterState::new(), &UniqueColumns::new());
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn allow_set_keeps_matching_rows() {
        let rows = color_rows(&["红", "蓝", "红"]);
        let visible =
            compute_visible_rows(&rows, &filter_of("色", &["红"]), &UniqueColumns::new());
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, rows[0].id);
        assert_eq!(visible[1].id, rows[2].id);
    }

    #[test]
    fn blank_marker_matches_empty_cells() {
        let rows = color_rows(&["红", "", " "]);
        let visible =
            compute_visible_rows(&rows, &filter_of("色", &[BLANK]), &UniqueColumns::new());
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn filters_on_several_columns_combine() {
        let rows = vec![
            Row::with_values([("色", "红"), ("尺码", "S")]),
            Row::with_values([("色", "红"), ("尺码", "M")]),
            Row::with_values([("色", "蓝"), ("尺码", "S")]),
        ];
        let mut filters = filter_of("色", &["红"]);
        filters.extend(filter_of("尺码", &["S"]));
        let visible = compute_visible_rows(&rows, &filters, &UniqueColumns::new());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, rows[0].id);
    }

    #[test]
    fn empty_allow_set_hides_everything() {
        let rows = color_rows(&["红"]);
        let visible = compute_visible_rows(&rows, &filter_of("色", &[]), &UniqueColumns::new());
        assert!(visible.is_empty());
    }

    #[test]
    fn single_unique_column_keeps_first_occurrence() {
        let rows = color_rows(&["红", "蓝", "红", "", "蓝", ""]);
        let visible = compute_visible_rows(&rows, &FilterState::new(), &unique_of(&["色"]));
        let ids: Vec<_> = visible.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![rows[0].id, rows[1].id, rows[3].id]);
    }

    #[test]
    fn unique_columns_dedup_jointly() {
        let rows = vec![
            Row::with_values([("色", "红"), ("尺码", "S")]),
            // new colour but a size already seen: dropped
            Row::with_values([("色", "蓝"), ("尺码", "S")]),
            Row::with_values([("色", "蓝"), ("尺码", "M")]),
            // the dropped row above did not record 蓝
            Row::with_values([("色", "绿"), ("尺码", "L")]),
        ];
        let visible =
            compute_visible_rows(&rows, &FilterState::new(), &unique_of(&["色", "尺码"]));
        let ids: Vec<_> = visible.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![rows[0].id, rows[2].id, rows[3].id]);
    }

    #[test]
    fn dedup_runs_after_filtering() {
        let rows = vec![
            Row::with_values([("色", "红"), ("尺码", "S")]),
            Row::with_values([("色", "红"), ("尺码", "M")]),
        ];
        let visible =
            compute_visible_rows(&rows, &filter_of("尺码", &["M"]), &unique_of(&["色"]));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, rows[1].id);
    }

    #[test]
    fn visible_rows_are_idempotent() {
        let rows = vec![
            Row::with_values([("色", "红"), ("尺码", "S")]),
            Row::with_values([("色", "蓝"), ("尺码", "S")]),
            Row::with_values([("色", "红"), ("尺码", "M")]),
            Row::with_values([("色", "红"), ("尺码", "")]),
            Row::with_values([("色", "绿"), ("尺码", "L")]),
        ];
        let filters = filter_of("色", &["红", "绿"]);
        let unique = unique_of(&["尺码"]);

        let once: Vec<Row> = compute_visible_rows(&rows, &filters, &unique)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Row> = compute_visible_rows(&once, &filters, &unique)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }
}
