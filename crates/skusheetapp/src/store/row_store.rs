use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::{CheckStatus, Row, RowId};
use crate::sync;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// A partial update for one row: the cells to overwrite and, optionally, a
/// new verification status.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPatch {
    pub id: RowId,
    pub changes: BTreeMap<String, String>,
    pub status: Option<CheckStatus>,
}

impl RowPatch {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            changes: BTreeMap::new(),
            status: None,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.changes.insert(column.into(), value.into());
        self
    }

    pub fn with_status(mut self, status: CheckStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn apply_to(&self, row: &mut Row) {
        for (column, value) in &self.changes {
            row.set(column, value.as_str());
        }
        if let Some(status) = self.status {
            row.check_status = status;
        }
    }
}

/// The ordered row list with write-through persistence.
///
/// Rows are held behind an `Arc`; every mutation builds a new list and swaps
/// it in, so a snapshot handed out by [`RowStore::rows`] never changes under
/// its holder. The new list is saved through the backend *before* the swap:
/// if saving fails the store keeps its last-good list.
pub struct RowStore<B: StorageBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    rows: Arc<Vec<Row>>,
    revision: u64,
}

impl<B: StorageBackend> RowStore<B> {
    /// Open the store, loading the persisted snapshot if there is one.
    pub fn open(backend: B) -> Result<Self> {
        let rows = backend.load_rows()?.unwrap_or_default();
        Ok(Self::with_rows(backend, rows))
    }

    /// Build a store over `rows` without loading from the backend.
    pub fn with_rows(backend: B, rows: Vec<Row>) -> Self {
        Self {
            backend,
            rows: Arc::new(rows),
            revision: 0,
        }
    }

    /// A shared snapshot of the current row list.
    pub fn rows(&self) -> Arc<Vec<Row>> {
        Arc::clone(&self.rows)
    }

    pub fn as_slice(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == *id)
    }

    /// Incremented on every committed mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        self.backend.saved_at()
    }

    /// Append rows at the end, stamping a fresh id on any row whose id is nil
    /// or already taken. Returns the ids of the added rows in order.
    pub fn add(&mut self, new_rows: Vec<Row>) -> Result<Vec<RowId>> {
        if new_rows.is_empty() {
            return Ok(Vec::new());
        }
        let mut taken: HashSet<RowId> = self.rows.iter().map(|r| r.id).collect();
        let mut rows = Vec::with_capacity(self.rows.len() + new_rows.len());
        rows.extend(self.rows.iter().cloned());

        let mut ids = Vec::with_capacity(new_rows.len());
        for mut row in new_rows {
            if row.id.is_nil() || taken.contains(&row.id) {
                row.id = RowId::new_v4();
            }
            taken.insert(row.id);
            ids.push(row.id);
            rows.push(row);
        }

        self.commit(rows)?;
        Ok(ids)
    }

    /// Remove every row whose id is listed. Unknown ids are ignored.
    pub fn remove(&mut self, ids: &[RowId]) -> Result<usize> {
        let targets: HashSet<&RowId> = ids.iter().collect();
        let rows: Vec<Row> = self
            .rows
            .iter()
            .filter(|r| !targets.contains(&r.id))
            .cloned()
            .collect();
        let removed = self.rows.len() - rows.len();
        if removed > 0 {
            self.commit(rows)?;
        }
        Ok(removed)
    }

    /// Set the verification status of the listed rows. Unknown ids are ignored.
    pub fn set_status(&mut self, ids: &[RowId], status: CheckStatus) -> Result<usize> {
        let targets: HashSet<&RowId> = ids.iter().collect();
        let mut matched = 0;
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                let mut row = r.clone();
                if targets.contains(&row.id) {
                    row.check_status = status;
                    matched += 1;
                }
                row
            })
            .collect();
        if matched > 0 {
            self.commit(rows)?;
        }
        Ok(matched)
    }

    /// Merge partial changes into matching rows in a single pass.
    ///
    /// Patches are indexed by id first, so the cost is O(rows + patches).
    /// Several patches for the same row apply in the order given.
    pub fn apply_batch(&mut self, updates: &[RowPatch]) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }
        let mut by_id: HashMap<RowId, Vec<&RowPatch>> = HashMap::with_capacity(updates.len());
        for patch in updates {
            by_id.entry(patch.id).or_default().push(patch);
        }

        let mut matched = 0;
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                let mut row = r.clone();
                if let Some(patches) = by_id.get(&row.id) {
                    for patch in patches {
                        patch.apply_to(&mut row);
                    }
                    matched += 1;
                }
                row
            })
            .collect();
        if matched > 0 {
            self.commit(rows)?;
        }
        Ok(matched)
    }

    /// Edit one cell and propagate it to sibling rows.
    ///
    /// Returns the ids of every row that received the value; empty when the
    /// source row no longer exists.
    pub fn edit_cell(&mut self, id: RowId, column: &str, value: &str) -> Result<Vec<RowId>> {
        let Some(outcome) = sync::apply_edit(&self.rows, id, column, value) else {
            debug!(%id, "edit dropped, row no longer exists");
            return Ok(Vec::new());
        };
        self.commit(outcome.rows)?;
        Ok(outcome.affected)
    }

    /// Drop every row and the persisted snapshot.
    pub fn reset(&mut self) -> Result<()> {
        self.backend.clear()?;
        self.rows = Arc::new(Vec::new());
        self.revision += 1;
        Ok(())
    }

    fn commit(&mut self, rows: Vec<Row>) -> Result<()> {
        self.backend.save_rows(&rows)?;
        self.rows = Arc::new(rows);
        self.revision += 1;
        debug!(revision = self.revision, rows = self.rows.len(), "row list committed");
        Ok(())
    }
}
