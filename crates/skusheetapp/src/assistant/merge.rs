//! Folding extracted records into new table rows.
//!
//! Records are grouped by product name in order of first appearance. Each
//! group becomes one product: one product code shared by all of its variant
//! rows, and product-level fields copied from the first record that has them,
//! so sibling rows agree from the start.
//!
//! A record whose (product name, specs) pair already exists, in the table or
//! earlier in the same batch, is skipped.

use super::ExtractedProduct;
use crate::columns::Column;
use crate::model::Row;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use tracing::{info, warn};

/// Mints `P` + `yyMMddHHmmss` + a counter of at least 3 digits.
///
/// Codes handed to [`CodeGenerator::reserve`] are never minted, so a fresh
/// generator started in the same second as an earlier extraction skips the
/// codes that extraction already put in the table.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    stamp: String,
    counter: u32,
    taken: HashSet<String>,
}

impl CodeGenerator {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            stamp: now.format("%y%m%d%H%M%S").to_string(),
            counter: 0,
            taken: HashSet::new(),
        }
    }

    pub fn now() -> Self {
        Self::new(Local::now())
    }

    /// Mark codes as in use.
    pub fn reserve<'a>(&mut self, codes: impl IntoIterator<Item = &'a str>) {
        self.taken
            .extend(codes.into_iter().map(str::trim).map(str::to_string));
    }

    pub fn next_code(&mut self) -> String {
        loop {
            self.counter += 1;
            let code = format!("P{}{:03}", self.stamp, self.counter);
            if self.taken.insert(code.clone()) {
                return code;
            }
        }
    }
}

/// An assistant-supplied code is kept only when it is ASCII and longer than
/// two characters; anything else is likely a made-up or translated label.
pub fn usable_code(code: Option<&str>) -> Option<&str> {
    code.map(str::trim)
        .filter(|c| c.is_ascii() && c.chars().count() > 2)
}

#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub rows: Vec<Row>,
    pub skipped: usize,
}

pub fn merge_extracted(
    existing: &[Row],
    records: Vec<ExtractedProduct>,
    codes: &mut CodeGenerator,
) -> MergeOutcome {
    let mut seen: HashSet<(String, String)> = existing
        .iter()
        .map(|row| {
            (
                row.product_name().unwrap_or_default().trim().to_string(),
                row.value(Column::SkuSpec).unwrap_or_default().trim().to_string(),
            )
        })
        .collect();

    codes.reserve(existing.iter().filter_map(Row::product_code));

    let mut outcome = MergeOutcome::default();
    let mut groups: Vec<(String, Vec<ExtractedProduct>)> = Vec::new();
    for record in records {
        let name = record.product_name.trim().to_string();
        if name.is_empty() {
            outcome.skipped += 1;
            continue;
        }
        let key = (name.clone(), record.specs.trim().to_string());
        if !seen.insert(key) {
            warn!(product = %name, specs = %record.specs, "duplicate variant skipped");
            outcome.skipped += 1;
            continue;
        }
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, group)) => group.push(record),
            None => groups.push((name, vec![record])),
        }
    }

    codes.reserve(groups.iter().flat_map(|(_, group)| {
        group
            .iter()
            .filter_map(|r| usable_code(r.product_code.as_deref()))
    }));
    for (name, group) in &groups {
        outcome.rows.extend(group_rows(name, group, codes));
    }
    info!(
        products = groups.len(),
        rows = outcome.rows.len(),
        skipped = outcome.skipped,
        "extraction merged"
    );
    outcome
}

fn group_rows(name: &str, group: &[ExtractedProduct], codes: &mut CodeGenerator) -> Vec<Row> {
    let product_code = group
        .iter()
        .find_map(|r| usable_code(r.product_code.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| codes.next_code());

    let category = first_filled(group, |r| r.category.as_str());
    let description = first_filled(group, |r| r.description.as_str());
    let detail = first_filled(group, |r| r.detail_html.as_str());
    let images: &[String] = group
        .iter()
        .map(|r| r.images.as_slice())
        .find(|imgs| !imgs.is_empty())
        .unwrap_or_default();

    group
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let sku_code = usable_code(Some(record.sku_code.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}-{}", product_code, i + 1));

            let mut row = Row::new();
            row.set_value(Column::ProductName, name);
            row.set_value(Column::ProductCode, product_code.as_str());
            row.set_value(Column::Category, category);
            row.set_value(Column::Description, description);
            row.set_value(Column::DetailHtml, detail);
            for (column, url) in Column::MAIN_IMAGES.iter().zip(images) {
                row.set_value(*column, url.as_str());
            }
            row.set_value(Column::SkuCode, sku_code);
            row.set_value(Column::SkuSpec, record.specs.trim());
            row.set_value(Column::SkuImage, record.sku_image.trim());
            row.set_value(Column::Price, record.price.trim());
            row.set_value(Column::Stock, record.stock.trim());
            row
        })
        .collect()
}

fn first_filled<'a>(
    group: &'a [ExtractedProduct],
    pick: impl Fn(&'a ExtractedProduct) -> &'a str,
) -> &'a str {
    group
        .iter()
        .map(pick)
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}
