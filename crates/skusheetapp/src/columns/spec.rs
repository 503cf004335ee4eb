//! Column specifications and registry.
//!
//! The bulk-upload template has a fixed, ordered set of columns. This module
//! is the single source of truth for their names and behaviours: which ones
//! are numeric at export time, which ones invalidate verification when edited,
//! and which ones must be present for a sheet to be recognised on import.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use super::scope::{scope, FieldScope};

/// The enumerated template columns, in template order.
///
/// Columns outside this schema are still accepted (they live in a row's
/// extension map), but every behaviour that has to be known up front is
/// attached to one of these variants through [`COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    ProductName,
    ProductCode,
    Category,
    Brand,
    SellingPoint,
    Description,
    DetailHtml,
    MainImage1,
    MainImage2,
    MainImage3,
    MainImage4,
    MainImage5,
    Origin,
    Unit,
    MainVideo,
    TransparentImage,
    Length,
    Width,
    Height,
    SkuCode,
    SkuSpec,
    SkuImage,
    Price,
    MarketPrice,
    CostPrice,
    Stock,
    Weight,
    Barcode,
    Color,
    Size,
    Supplier,
    Remark,
}

/// Specification for a single template column.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub column: Column,

    /// Header text as it appears in the upload template
    pub name: &'static str,

    /// Coerced to a number on export when the cell parses as one
    pub numeric: bool,

    /// Editing this column resets the row to unverified
    pub critical: bool,

    /// Must appear in a row for that row to be taken as the header on import
    pub required: bool,
}

impl ColumnSpec {
    const fn new(column: Column, name: &'static str) -> Self {
        Self {
            column,
            name,
            numeric: false,
            critical: false,
            required: false,
        }
    }

    const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    const fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Header of the pseudo-column carrying the verification flag in exported
/// sheets. It is never imported back.
pub const STATUS_COLUMN: &str = "审核状态";

/// Registry of all template columns, indexed by `Column as usize`.
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(Column::ProductName, "商品名称")
        .critical()
        .required(),
    ColumnSpec::new(Column::ProductCode, "商品编码"),
    ColumnSpec::new(Column::Category, "商品分类"),
    ColumnSpec::new(Column::Brand, "商品品牌"),
    ColumnSpec::new(Column::SellingPoint, "商品卖点"),
    ColumnSpec::new(Column::Description, "商品描述"),
    ColumnSpec::new(Column::DetailHtml, "商品详情"),
    ColumnSpec::new(Column::MainImage1, "商品主图1"),
    ColumnSpec::new(Column::MainImage2, "商品主图2"),
    ColumnSpec::new(Column::MainImage3, "商品主图3"),
    ColumnSpec::new(Column::MainImage4, "商品主图4"),
    ColumnSpec::new(Column::MainImage5, "商品主图5"),
    ColumnSpec::new(Column::Origin, "商品产地"),
    ColumnSpec::new(Column::Unit, "商品单位"),
    ColumnSpec::new(Column::MainVideo, "主图视频"),
    ColumnSpec::new(Column::TransparentImage, "透明素材图"),
    ColumnSpec::new(Column::Length, "长").numeric(),
    ColumnSpec::new(Column::Width, "宽").numeric(),
    ColumnSpec::new(Column::Height, "高").numeric(),
    ColumnSpec::new(Column::SkuCode, "SKU编码"),
    ColumnSpec::new(Column::SkuSpec, "SKU规格").critical(),
    ColumnSpec::new(Column::SkuImage, "SKU图片"),
    ColumnSpec::new(Column::Price, "价格").numeric().required(),
    ColumnSpec::new(Column::MarketPrice, "市场价").numeric(),
    ColumnSpec::new(Column::CostPrice, "成本价").numeric(),
    ColumnSpec::new(Column::Stock, "库存").numeric(),
    ColumnSpec::new(Column::Weight, "重量").numeric(),
    ColumnSpec::new(Column::Barcode, "条形码"),
    ColumnSpec::new(Column::Color, "颜色"),
    ColumnSpec::new(Column::Size, "尺码"),
    ColumnSpec::new(Column::Supplier, "供应商"),
    ColumnSpec::new(Column::Remark, "备注"),
];

static BY_NAME: Lazy<HashMap<&'static str, Column>> =
    Lazy::new(|| COLUMNS.iter().map(|spec| (spec.name, spec.column)).collect());

impl Column {
    pub const MAIN_IMAGES: [Column; 5] = [
        Column::MainImage1,
        Column::MainImage2,
        Column::MainImage3,
        Column::MainImage4,
        Column::MainImage5,
    ];

    pub fn spec(self) -> &'static ColumnSpec {
        &COLUMNS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Look up a template column by its header text.
    pub fn from_name(name: &str) -> Option<Column> {
        BY_NAME.get(name).copied()
    }

    pub fn scope(self) -> FieldScope {
        scope(self.name())
    }

    pub fn all() -> impl Iterator<Item = Column> {
        COLUMNS.iter().map(|spec| spec.column)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Column::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown column: {}", name)))
    }
}

/// Whether a column name refers to one of the critical fields.
pub fn is_critical(name: &str) -> bool {
    Column::from_name(name).is_some_and(|c| c.spec().critical)
}

/// Whether a column name refers to a numeric template column.
pub fn is_numeric(name: &str) -> bool {
    Column::from_name(name).is_some_and(|c| c.spec().numeric)
}

/// Header names that identify the header row on import.
pub fn required_names() -> impl Iterator<Item = &'static str> {
    COLUMNS
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
}
