//! # skusheet
//!
//! A small in-memory table engine for marketplace product uploads. Each row is
//! one (product, variant) pair; a product with several variants is several rows
//! that share a product code and repeat the product-level fields.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────┐   ┌────────────┐   ┌────────────────┐
//! │ CLI (bin)  │──▶│   api    │──▶│  commands  │──▶│ store / sync / │
//! └────────────┘   └──────────┘   └────────────┘   │ view / grid    │
//!                                                  └────────────────┘
//! ```
//!
//! - [`columns`]: the template column registry and field-scope classifier
//! - [`model`]: [`model::Row`] and verification status
//! - [`store`]: the ordered row list with write-through persistence
//! - [`sync`]: which rows an edit fans out to
//! - [`view`]: value histograms, filters and unique-column dedup
//! - [`grid`]: spreadsheet import and export
//! - [`assistant`]: the remote extraction / rename / optimize collaborator
//! - [`commands`]: one function per operation, returning [`commands::CmdResult`]
//! - [`api`]: the facade a UI talks to
//!
//! Everything but the assistant is synchronous. A failed operation leaves the
//! table in its last saved state.

pub mod api;
pub mod assistant;
pub mod columns;
pub mod commands;
pub mod config;
pub mod error;
pub mod grid;
pub mod index;
pub mod init;
pub mod model;
pub mod store;
pub mod sync;
pub mod view;
