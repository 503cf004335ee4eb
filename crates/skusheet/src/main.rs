//! # skusheet CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/skusheetapp/`: the table engine, UI agnostic
//! - `crates/skusheet/`: this CLI, a client of `skusheetapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/skusheet/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - View flags + dispatch (commands.rs)                      │
//! │  - Terminal rendering (print.rs)                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (skusheetapp::api)                               │
//! │  - Selectors and COL=VAL strings → typed values             │
//! │  - Owns the view state (filters, unique columns)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (skusheetapp::commands)                      │
//! │  - Business logic over the Row Store                        │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! Business logic is unit tested inside `skusheetapp`. This crate carries
//! end-to-end tests in `tests/` that drive the real binary against a
//! temporary data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        if let Some(raw) = e.raw_response() {
            eprintln!("Response was:\n{}", raw);
        }
        std::process::exit(1);
    }
}
