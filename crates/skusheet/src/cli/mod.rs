//! # CLI Behavior
//!
//! This is **one possible UI client** for skusheet, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## One Process, One View
//!
//! The table persists between runs; the view does not. Filters and unique
//! columns are given as flags on `list`, `stats` and `export`:
//!
//! ```text
//! skusheet list --filter 色=红,蓝 --unique 商品编码
//! skusheet stats 色 --filter 尺码=M
//! skusheet export --unique 商品编码 --out ./out
//! ```
//!
//! Row arguments always use the position shown by `list`, which is the row's
//! place in the full table, so a position taken from a filtered listing still
//! names the same row in the next command.
//!
//! ### Naked Execution
//!
//! Running `skusheet` with no arguments lists the table.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context setup and dispatch to the API
//! - `print`: Tables, colors and messages

mod commands;
mod print;
pub mod setup;

pub use commands::run;
