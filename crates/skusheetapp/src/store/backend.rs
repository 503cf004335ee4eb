use crate::error::Result;
use crate::model::Row;
use chrono::{DateTime, Utc};

/// Abstract interface for raw snapshot I/O.
/// This trait handles the "how" of persistence (filesystem vs memory),
/// while RowStore handles the "what" (ids, copy-on-write, sync).
pub trait StorageBackend {
    /// Load the persisted row list.
    /// Returns Ok(None) when nothing was ever saved.
    fn load_rows(&self) -> Result<Option<Vec<Row>>>;

    /// Persist the full row list.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_rows(&self, rows: &[Row]) -> Result<()>;

    /// Remove the persisted snapshot entirely.
    fn clear(&self) -> Result<()>;

    /// When the snapshot was last written, if known.
    fn saved_at(&self) -> Result<Option<DateTime<Utc>>>;
}
