//! # Storage Layer
//!
//! The Row Store owns the ordered list of rows. It guarantees unique row ids,
//! hands out immutable snapshots, and writes every mutation through to a
//! [`backend::StorageBackend`].
//!
//! ## Copy-on-Write
//!
//! The list lives behind an `Arc<Vec<Row>>`. A mutation never edits rows in
//! place: it builds the next list, persists it, and swaps it in. Anything that
//! kept the previous `Arc` still sees the previous table, and comparing
//! [`RowStore::revision`] is enough to detect a change.
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `add` | Append rows, stamping fresh ids where needed |
//! | `remove` | Drop rows by id; unknown ids are ignored |
//! | `set_status` | Set verification status by id |
//! | `apply_batch` | Merge partial cell changes, one pass over the table |
//! | `edit_cell` | Single-cell edit with sibling propagation (see [`crate::sync`]) |
//! | `reset` | Empty the table and delete the snapshot |
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: `rows.json` in the data directory, written atomically.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── rows.json        # Row snapshot
//! └── skusheet.toml    # Configuration
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod row_store;

pub use backend::StorageBackend;
pub use row_store::{RowPatch, RowStore};

pub type FileStore = RowStore<fs_backend::FsBackend>;
