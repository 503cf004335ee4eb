//! # Product Assistant
//!
//! The remote language model is a collaborator, reached through the
//! [`ProductAssistant`] trait. It turns free text into product records,
//! suggests better titles and tidies SKU spec strings.
//!
//! The trait is async; the rest of the crate is not. Commands await one call,
//! then hand the finished records to the store in a single mutation, so the
//! table never sees a half-applied answer.
//!
//! - [`client::LlmAssistant`]: OpenAI-compatible chat-completions client.
//! - [`json`]: tolerant parsing of model output (code fences, numbers where
//!   strings are expected).
//! - [`merge`]: folding extracted records into new rows.

pub mod client;
pub mod json;
pub mod merge;

pub use client::LlmAssistant;
pub use merge::{merge_extracted, CodeGenerator, MergeOutcome};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One product variant as returned by extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedProduct {
    #[serde(deserialize_with = "json::lenient_string")]
    pub product_name: String,
    #[serde(deserialize_with = "json::lenient_string")]
    pub price: String,
    #[serde(deserialize_with = "json::lenient_string")]
    pub specs: String,
    #[serde(deserialize_with = "json::lenient_string")]
    pub sku_code: String,
    #[serde(deserialize_with = "json::lenient_opt_string")]
    pub product_code: Option<String>,
    #[serde(deserialize_with = "json::lenient_string")]
    pub stock: String,
    #[serde(deserialize_with = "json::lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "json::lenient_string")]
    pub detail_html: String,
    #[serde(deserialize_with = "json::string_list")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "json::lenient_string")]
    pub sku_image: String,
    #[serde(deserialize_with = "json::lenient_string")]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedTitle {
    pub original: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedSpec {
    pub original: String,
    pub optimized: String,
}

#[async_trait]
pub trait ProductAssistant {
    /// Pull product/SKU records out of free text or HTML.
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedProduct>>;

    /// Suggest marketplace titles. `names` holds no duplicates.
    async fn rename(&self, names: &[String]) -> Result<Vec<RenamedTitle>>;

    /// Normalize SKU spec strings. `specs` holds no duplicates.
    async fn optimize_specs(&self, specs: &[String]) -> Result<Vec<OptimizedSpec>>;
}

// --- Test Doubles ---

#[cfg(any(test, feature = "test_utils"))]
pub mod mock {
    use super::*;
    use crate::error::SheetError;
    use std::sync::Mutex;

    /// Answers from canned data and records what it was asked.
    #[derive(Default)]
    pub struct ScriptedAssistant {
        pub products: Vec<ExtractedProduct>,
        pub titles: Vec<RenamedTitle>,
        pub specs: Vec<OptimizedSpec>,
        pub fail_with: Option<String>,
        pub calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedAssistant {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_products(mut self, products: Vec<ExtractedProduct>) -> Self {
            self.products = products;
            self
        }

        pub fn with_titles(mut self, pairs: &[(&str, &str)]) -> Self {
            self.titles = pairs
                .iter()
                .map(|(original, new_name)| RenamedTitle {
                    original: original.to_string(),
                    new_name: new_name.to_string(),
                })
                .collect();
            self
        }

        pub fn with_specs(mut self, pairs: &[(&str, &str)]) -> Self {
            self.specs = pairs
                .iter()
                .map(|(original, optimized)| OptimizedSpec {
                    original: original.to_string(),
                    optimized: optimized.to_string(),
                })
                .collect();
            self
        }

        /// Every call fails with an API error carrying `raw`.
        pub fn failing(raw: &str) -> Self {
            Self {
                fail_with: Some(raw.to_string()),
                ..Self::default()
            }
        }

        /// Inputs of every call so far, in order.
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn record(&self, input: Vec<String>) -> Result<()> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(input);
            }
            match &self.fail_with {
                Some(raw) => Err(SheetError::api("API error (500)", raw.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ProductAssistant for ScriptedAssistant {
        async fn extract(&self, text: &str) -> Result<Vec<ExtractedProduct>> {
            self.record(vec![text.to_string()])?;
            Ok(self.products.clone())
        }

        async fn rename(&self, names: &[String]) -> Result<Vec<RenamedTitle>> {
            self.record(names.to_vec())?;
            Ok(self.titles.clone())
        }

        async fn optimize_specs(&self, specs: &[String]) -> Result<Vec<OptimizedSpec>> {
            self.record(specs.to_vec())?;
            Ok(self.specs.clone())
        }
    }
}
