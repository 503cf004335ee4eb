//! # Command Layer
//!
//! This module contains the **core business logic** of skusheet. Each command
//! lives in its own submodule as a plain function over a [`RowStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve selectors, validate input, call into the store, sync and view engines
//! - Return structured [`CmdResult`] values with affected rows and messages
//! - Stay UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal output**: no stdout, stderr or colors
//! - **Argument parsing**: that's the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! A failing command leaves the store as it was: every command commits at
//! most once, after all validation.
//!
//! ## Assistant Commands
//!
//! [`extract`], [`rename`] and [`optimize`] are `async` because they await the
//! [`ProductAssistant`](crate::assistant::ProductAssistant). Each awaits one
//! call and then commits the whole answer in one store mutation.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` fixtures and, for assistant commands, the
//! scripted assistant from [`crate::assistant::mock`].
//!
//! ## Command Modules
//!
//! - [`add`]: Add a blank or pre-filled row
//! - [`delete`]: Remove rows
//! - [`status`]: Mark rows verified or unverified
//! - [`edit`]: Single-cell edit with sibling propagation
//! - [`update`]: Batch cell changes
//! - [`images`]: Fill the main image slots of rows and their siblings
//! - [`import`]: Load a spreadsheet file
//! - [`export`]: Write the visible rows to a CSV file
//! - [`extract`]: Rows from free text via the assistant
//! - [`rename`]: Assistant-suggested product titles
//! - [`optimize`]: Assistant-normalized SKU specs
//! - [`list`]: The visible rows
//! - [`stats`]: Value histogram of one column
//! - [`info`]: Table summary
//! - [`reset`]: Clear the table
//! - [`helpers`]: Shared utilities

use crate::index::DisplayRow;
use crate::view::ValueCount;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod extract;
pub mod helpers;
pub mod images;
pub mod import;
pub mod info;
pub mod list;
pub mod optimize;
pub mod rename;
pub mod reset;
pub mod stats;
pub mod status;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Counts shown by `info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub verified: usize,
    pub products: usize,
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_rows: Vec<DisplayRow>,
    pub listed_rows: Vec<DisplayRow>,
    pub stats: Vec<ValueCount>,
    pub summary: Option<TableSummary>,
    pub output_path: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_rows(mut self, rows: Vec<DisplayRow>) -> Self {
        self.affected_rows = rows;
        self
    }

    pub fn with_listed_rows(mut self, rows: Vec<DisplayRow>) -> Self {
        self.listed_rows = rows;
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
