//! Field-scope classification.
//!
//! Multi-variant products are stored one row per variant, with the
//! product-level fields repeated on every variant row. Whether a column is
//! product-level or variant-level decides how far an edit fans out, so the
//! rule lives here and nowhere else.

/// Columns whose header starts with this marker describe the product.
pub const PRODUCT_PREFIX: &str = "商品";

/// Product-only physical and media attributes that do not carry the prefix.
pub const PRODUCT_ONLY: &[&str] = &["长", "宽", "高", "主图视频", "透明素材图"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldScope {
    /// Shared by every variant row of a product (matched on product code)
    Product,
    /// Specific to one variant (matched on sku code)
    Sku,
}

/// Classify a column by its header text. Works for template and extension
/// columns alike.
pub fn scope(column: &str) -> FieldScope {
    if column.starts_with(PRODUCT_PREFIX) || PRODUCT_ONLY.contains(&column) {
        FieldScope::Product
    } else {
        FieldScope::Sku
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;

    #[test]
    fn prefixed_columns_are_product_scope() {
        assert_eq!(scope("商品名称"), FieldScope::Product);
        assert_eq!(scope("商品主图3"), FieldScope::Product);
        // extension columns follow the same rule
        assert_eq!(scope("商品材质"), FieldScope::Product);
    }

    #[test]
    fn whitelisted_columns_are_product_scope() {
        for name in PRODUCT_ONLY {
            assert_eq!(scope(name), FieldScope::Product, "{}", name);
        }
    }

    #[test]
    fn everything_else_is_sku_scope() {
        assert_eq!(scope("SKU规格"), FieldScope::Sku);
        assert_eq!(scope("价格"), FieldScope::Sku);
        assert_eq!(scope("色"), FieldScope::Sku);
        assert_eq!(scope(""), FieldScope::Sku);
        // the prefix must lead the name
        assert_eq!(scope("副商品名称"), FieldScope::Sku);
    }

    #[test]
    fn template_split_is_nineteen_product_thirteen_sku() {
        let product = Column::all()
            .filter(|c| c.scope() == FieldScope::Product)
            .count();
        assert_eq!(product, 19);
        assert_eq!(Column::all().count() - product, 13);
    }
}
