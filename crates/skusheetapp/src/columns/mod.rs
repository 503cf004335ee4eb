//! # Column Schema
//!
//! Rows carry a fixed template of 32 named columns plus any extra columns an
//! imported sheet brings along. This module describes the template:
//!
//! - **Registry** ([`COLUMNS`]): header text and per-column flags
//!   (numeric, critical, required for header detection)
//! - **Scope** ([`scope`]): whether a column is product-level or SKU-level
//!
//! ## Scope Rule
//!
//! | Scope | Rule | Examples |
//! |-------|------|----------|
//! | `Product` | name starts with `商品`, or is `长`/`宽`/`高`/`主图视频`/`透明素材图` | `商品名称`, `商品主图1`, `长` |
//! | `Sku` | everything else | `SKU规格`, `价格`, `库存` |
//!
//! The synchronization engine, the import adapter and the extraction merge
//! all classify through [`scope`]; nothing re-derives it locally.

mod scope;
mod spec;

pub use scope::{scope, FieldScope, PRODUCT_ONLY, PRODUCT_PREFIX};
pub use spec::{is_critical, is_numeric, required_names, Column, ColumnSpec, COLUMNS, STATUS_COLUMN};
