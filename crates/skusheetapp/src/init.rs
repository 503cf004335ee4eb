//! # Data Directory
//!
//! The table snapshot (`rows.json`) and the config file (`skusheet.toml`)
//! live in one data directory, chosen in priority order:
//!
//! 1. `data_override` (the CLI `--data` flag)
//! 2. the `SKUSHEET_HOME` environment variable
//! 3. the OS data directory from [`directories::ProjectDirs`]
//!
//! [`initialize`] resolves the directory, loads the configuration and opens
//! the store.

use crate::api::SheetApi;
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use crate::store::fs_backend::FsBackend;
use crate::store::RowStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const HOME_ENV: &str = "SKUSHEET_HOME";

pub struct SheetContext {
    pub api: SheetApi<FsBackend>,
    pub config: SheetConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "skusheet", "skusheet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SheetError::Store("Could not determine a data directory".to_string()))
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<SheetContext> {
    let data_dir = resolve_data_dir(data_override)?;
    debug!(data_dir = %data_dir.display(), "data directory resolved");

    let config = SheetConfig::load(&data_dir)?;
    let store = RowStore::open(FsBackend::new(data_dir.clone()))?;
    Ok(SheetContext {
        api: SheetApi::new(store),
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn override_wins() {
        let dir = tempdir().unwrap();
        let resolved = resolve_data_dir(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn initialize_opens_empty_table() {
        let dir = tempdir().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert!(ctx.api.rows().is_empty());
        assert_eq!(ctx.data_dir, dir.path());
    }

    #[test]
    fn initialize_reloads_saved_rows() {
        let dir = tempdir().unwrap();
        {
            let mut ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
            ctx.api.add_row(&["商品名称=杯子"]).unwrap();
        }
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.api.rows()[0].product_name(), Some("杯子"));
    }
}
