use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::Row;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const ROWS_FILE: &str = "rows.json";

/// Filesystem backend: one pretty-printed JSON snapshot in the data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rows_path(&self) -> PathBuf {
        self.root.join(ROWS_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_rows(&self) -> Result<Option<Vec<Row>>> {
        let path = self.rows_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let rows: Vec<Row> = serde_json::from_str(&content)?;
        Ok(Some(rows))
    }

    fn save_rows(&self, rows: &[Row]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(rows)?;

        let tmp_file = self.root.join(format!(".rows-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, self.rows_path())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.rows_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        let path = self.rows_path();
        if !path.exists() {
            return Ok(None);
        }
        let modified = fs::metadata(path)?.modified()?;
        Ok(Some(modified.into()))
    }
}
