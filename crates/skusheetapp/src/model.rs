//! # Domain Model: Rows
//!
//! A [`Row`] is one (product, variant) pair of the upload table. Products with
//! several variants occupy several rows that share a product code and repeat
//! the product-level fields.
//!
//! ## Cells
//!
//! Cells are plain strings addressed by header text. Template columns are
//! stored under their [`Column`] variant; any other header (an imported `色`
//! column, say) goes to the `extra` map. Both are reached through
//! [`Row::get`] / [`Row::set`], so callers never care which side a column
//! lives on.
//!
//! A missing cell and an empty cell are the same thing: [`Row::set`] with an
//! empty string removes the entry.
//!
//! ## Identity
//!
//! - `id`: UUID minted at creation, stable across edits, never reused.
//! - `商品编码` / `SKU编码`: free-text codes used by the sync engine to find
//!   sibling rows. Either may be empty.
//!
//! ## Verification
//!
//! [`CheckStatus`] starts as `Unverified` for every row created by import,
//! extraction or manual add. The operator flips it to `Verified`; edits to the
//! product name or SKU spec flip it back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::columns::Column;

pub type RowId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Unverified,
    Verified,
}

impl CheckStatus {
    /// Label used in the exported status column.
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Unverified => "未审核",
            CheckStatus::Verified => "已审核",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    #[serde(default)]
    pub check_status: CheckStatus,
    #[serde(default)]
    pub cells: BTreeMap<Column, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            check_status: CheckStatus::Unverified,
            cells: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Build a row from `(header, value)` pairs.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (name, value) in values {
            row.set(name.as_ref(), value);
        }
        row
    }

    /// Get a cell by header text. Empty cells are `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match Column::from_name(name) {
            Some(column) => self.cells.get(&column),
            None => self.extra.get(name),
        };
        value.map(String::as_str)
    }

    pub fn value(&self, column: Column) -> Option<&str> {
        self.cells.get(&column).map(String::as_str)
    }

    /// Set a cell by header text. An empty value clears the cell.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match Column::from_name(name) {
            Some(column) => self.set_value(column, value),
            None if value.is_empty() => {
                self.extra.remove(name);
            }
            None => {
                self.extra.insert(name.to_string(), value);
            }
        }
    }

    pub fn set_value(&mut self, column: Column, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&column);
        } else {
            self.cells.insert(column, value);
        }
    }

    pub fn product_code(&self) -> Option<&str> {
        self.value(Column::ProductCode)
    }

    pub fn sku_code(&self) -> Option<&str> {
        self.value(Column::SkuCode)
    }

    pub fn product_name(&self) -> Option<&str> {
        self.value(Column::ProductName)
    }

    pub fn is_verified(&self) -> bool {
        self.check_status == CheckStatus::Verified
    }

    /// True when no cell carries a non-whitespace value.
    pub fn is_blank(&self) -> bool {
        self.cells
            .values()
            .chain(self.extra.values())
            .all(|v| v.trim().is_empty())
    }

    /// Header names of every populated cell, template columns first.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.cells
            .keys()
            .map(|c| c.name())
            .chain(self.extra.keys().map(String::as_str))
    }
}
