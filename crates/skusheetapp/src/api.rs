//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every skusheet operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: selector strings become [`RowSelector`]s,
//!   `COL=VAL` strings become column/value pairs
//! - **Owns the view state**: filters and unique columns live next to the
//!   store, and a successful import or reset clears them
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business logic stays in `commands/*.rs`; printing stays in the CLI.
//!
//! ## Generic Over StorageBackend
//!
//! `SheetApi<B: StorageBackend>`:
//! - Production: `SheetApi<FsBackend>`
//! - Testing: `SheetApi<MemBackend>`

use crate::assistant::ProductAssistant;
use crate::commands::{self, CmdResult};
use crate::error::{Result, SheetError};
use crate::index::{parse_selectors, RowSelector};
use crate::model::Row;
use crate::store::{RowStore, StorageBackend};
use crate::view::{FilterDraft, ViewState};
use std::path::Path;

pub struct SheetApi<B: StorageBackend> {
    store: RowStore<B>,
    view: ViewState,
}

impl<B: StorageBackend> SheetApi<B> {
    pub fn new(store: RowStore<B>) -> Self {
        Self {
            store,
            view: ViewState::new(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &RowStore<B> {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    // --- View state ---

    /// Restrict `column` to the given canonical values.
    pub fn set_filter<S: AsRef<str>>(&mut self, column: &str, values: &[S]) {
        self.view.set_filter(column, values.iter().map(|v| v.as_ref()));
    }

    pub fn toggle_unique(&mut self, column: &str) -> bool {
        self.view.toggle_unique(column)
    }

    pub fn open_filter(&self, column: &str) -> FilterDraft {
        self.view.open_filter(column, self.store.as_slice())
    }

    pub fn apply_filter(&mut self, draft: FilterDraft) {
        self.view.apply_filter(draft);
    }

    pub fn clear_filter(&mut self, column: &str) {
        self.view.clear_filter(column);
    }

    pub fn clear_view(&mut self) {
        self.view.clear_all();
    }

    // --- Reads ---

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store, &self.view)
    }

    pub fn stats(&self, column: &str) -> Result<CmdResult> {
        commands::stats::run(&self.store, &self.view, column)
    }

    pub fn info(&self) -> Result<CmdResult> {
        commands::info::run(&self.store)
    }

    // --- Mutations ---

    pub fn add_row<S: AsRef<str>>(&mut self, assignments: &[S]) -> Result<CmdResult> {
        let values = parse_assignments(assignments)?;
        commands::add::run(&mut self.store, &values)
    }

    pub fn edit_cell(&mut self, selector: &str, column: &str, value: &str) -> Result<CmdResult> {
        let selector: RowSelector = selector.parse()?;
        commands::edit::run(&mut self.store, &selector, column, value)
    }

    pub fn update_rows<I: AsRef<str>, S: AsRef<str>>(
        &mut self,
        selectors: &[I],
        assignments: &[S],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let changes = parse_assignments(assignments)?;
        commands::update::run(&mut self.store, &selectors, &changes)
    }

    pub fn delete_rows<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn verify_rows<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::status::verify(&mut self.store, &selectors)
    }

    pub fn unverify_rows<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::status::unverify(&mut self.store, &selectors)
    }

    pub fn insert_images<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        urls: &[String],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::images::run(&mut self.store, &selectors, urls)
    }

    /// Import a file. On success the view is cleared so stale filters do not
    /// hide the new rows.
    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, path)?;
        self.view.clear_all();
        Ok(result)
    }

    pub fn export(&self, out_dir: &Path) -> Result<CmdResult> {
        commands::export::run(&self.store, &self.view, out_dir)
    }

    pub fn reset(&mut self) -> Result<CmdResult> {
        let result = commands::reset::run(&mut self.store)?;
        self.view.clear_all();
        Ok(result)
    }

    // --- Assistant ---

    pub async fn extract<A: ProductAssistant + ?Sized>(
        &mut self,
        assistant: &A,
        text: &str,
    ) -> Result<CmdResult> {
        commands::extract::run(&mut self.store, assistant, text).await
    }

    pub async fn rename<A: ProductAssistant + ?Sized, I: AsRef<str>>(
        &mut self,
        assistant: &A,
        selectors: &[I],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::rename::run(&mut self.store, assistant, &selectors).await
    }

    pub async fn optimize<A: ProductAssistant + ?Sized, I: AsRef<str>>(
        &mut self,
        assistant: &A,
        selectors: &[I],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::optimize::run(&mut self.store, assistant, &selectors).await
    }
}

/// Split `COL=VAL` into a column and value. The value may be empty or
/// contain further `=` signs.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(SheetError::InvalidInput(format!(
            "Expected COLUMN=VALUE, got: {}",
            input
        ))),
    }
}

pub fn parse_assignments<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<(String, String)>> {
    inputs.iter().map(|s| parse_assignment(s.as_ref())).collect()
}

/// Split `COL=V1,V2` into a column and its allow-set values.
pub fn parse_filter(input: &str) -> Result<(String, Vec<String>)> {
    let (column, values) = parse_assignment(input)?;
    let values = values.split(',').map(|v| v.trim().to_string()).collect();
    Ok((column, values))
}
