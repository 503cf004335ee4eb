use super::mem_backend::MemBackend;
use super::row_store::RowStore;

pub type InMemoryStore = RowStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RowStore::with_rows(MemBackend::new(), Vec::new())
    }

    /// Start from whatever snapshot the backend already holds.
    pub fn with_backend(backend: MemBackend) -> Self {
        let rows = backend.snapshot().unwrap_or_default();
        RowStore::with_rows(backend, rows)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{CheckStatus, Row};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// One standalone row per product name, no codes.
        pub fn with_products(mut self, names: &[&str]) -> Self {
            let rows = names
                .iter()
                .map(|name| Row::with_values([("商品名称", *name)]))
                .collect();
            self.store.add(rows).unwrap();
            self
        }

        /// A multi-variant product: one row per spec sharing `product_code`.
        pub fn with_variants(mut self, name: &str, product_code: &str, specs: &[&str]) -> Self {
            let rows = specs
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    Row::with_values([
                        ("商品名称", name.to_string()),
                        ("商品编码", product_code.to_string()),
                        ("SKU编码", format!("{}-{}", product_code, i + 1)),
                        ("SKU规格", spec.to_string()),
                    ])
                })
                .collect();
            self.store.add(rows).unwrap();
            self
        }

        pub fn with_row(mut self, values: &[(&str, &str)]) -> Self {
            self.store
                .add(vec![Row::with_values(values.iter().copied())])
                .unwrap();
            self
        }

        pub fn all_verified(mut self) -> Self {
            let ids: Vec<_> = self.store.as_slice().iter().map(|r| r.id).collect();
            self.store.set_status(&ids, CheckStatus::Verified).unwrap();
            self
        }
    }
}
