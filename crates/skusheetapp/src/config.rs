//! # Configuration
//!
//! Settings are loaded with [`confique`] from three layers, in priority order:
//!
//! 1. **Environment variables**: `SKUSHEET_API_KEY`, `SKUSHEET_API_BASE`, `SKUSHEET_MODEL`.
//! 2. **Config file**: `skusheet.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_base_url` | `https://api.openai.com/v1` | OpenAI-compatible endpoint |
//! | `model` | `gpt-4o-mini` | Chat model name |
//! | `api_key` | none | Bearer token; assistant commands refuse to run without it |
//! | `temperature` | `0.2` | Sampling temperature |
//! | `max_tokens` | `4096` | Completion limit |
//! | `request_timeout_secs` | `120` | Per-request timeout |
//! | `export_dir` | current directory | Where `export` writes files |
//! | `extract_prompt` | built in | Replaces the extraction system prompt |
//!
//! `skusheet config` prints the effective values; `skusheet config --template`
//! prints a commented `skusheet.toml`.

use crate::assistant::client::DEFAULT_EXTRACT_PROMPT;
use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "skusheet.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Base URL of the OpenAI-compatible API.
    #[config(env = "SKUSHEET_API_BASE", default = "https://api.openai.com/v1")]
    pub api_base_url: String,

    /// Chat model used for extraction, renaming and spec cleanup.
    #[config(env = "SKUSHEET_MODEL", default = "gpt-4o-mini")]
    pub model: String,

    /// API key sent as a bearer token.
    #[config(env = "SKUSHEET_API_KEY")]
    pub api_key: Option<String>,

    #[config(default = 0.2)]
    pub temperature: f32,

    #[config(default = 4096)]
    pub max_tokens: u32,

    #[config(default = 120)]
    pub request_timeout_secs: u64,

    /// Directory for exported files. Defaults to the current directory.
    pub export_dir: Option<PathBuf>,

    /// Replacement for the built-in extraction prompt.
    pub extract_prompt: Option<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.2,
            max_tokens: 4096,
            request_timeout_secs: 120,
            export_dir: None,
            extract_prompt: None,
        }
    }
}

impl SheetConfig {
    /// Load from the environment and `<data_dir>/skusheet.toml`. A missing
    /// file is fine; a malformed one is an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILE))
            .load()?;
        Ok(config)
    }

    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn extract_prompt(&self) -> &str {
        self.extract_prompt
            .as_deref()
            .unwrap_or(DEFAULT_EXTRACT_PROMPT)
    }

    /// A commented `skusheet.toml` listing every key with its default.
    pub fn template() -> String {
        confique::toml::template::<SheetConfig>(confique::toml::FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SheetConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.extract_prompt(), DEFAULT_EXTRACT_PROMPT);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = SheetConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_prompt_override() {
        let config = SheetConfig {
            extract_prompt: Some("自定义".to_string()),
            ..Default::default()
        };
        assert_eq!(config.extract_prompt(), "自定义");
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "model = \"local-model\"\nmax_tokens = 512\n",
        )
        .unwrap();
        let config = SheetConfig::load(dir.path()).unwrap();
        assert_eq!(config.model, "local-model");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "max_tokens = \"lots\"").unwrap();
        assert!(SheetConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_template_mentions_every_key() {
        let template = SheetConfig::template();
        for key in ["api_base_url", "model", "api_key", "export_dir"] {
            assert!(template.contains(key), "missing {}", key);
        }
    }
}
