use super::backend::StorageBackend;
use crate::error::{Result, SheetError};
use crate::model::Row;
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the table engine is
/// single-threaded, which lets `StorageBackend` keep `&self` methods.
#[derive(Default)]
pub struct MemBackend {
    snapshot: RefCell<Option<(Vec<Row>, DateTime<Utc>)>>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let backend = Self::new();
        *backend.snapshot.borrow_mut() = Some((rows, Utc::now()));
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> Option<Vec<Row>> {
        self.snapshot.borrow().as_ref().map(|(rows, _)| rows.clone())
    }
}

impl StorageBackend for MemBackend {
    fn load_rows(&self) -> Result<Option<Vec<Row>>> {
        Ok(self.snapshot())
    }

    fn save_rows(&self, rows: &[Row]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SheetError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.borrow_mut() = Some((rows.to_vec(), Utc::now()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.snapshot.borrow_mut() = None;
        Ok(())
    }

    fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.snapshot.borrow().as_ref().map(|(_, at)| *at))
    }
}
