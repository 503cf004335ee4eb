//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//! - Starts an async runtime
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments become typed commands via clap
//! 2. **Logging**: a `tracing` subscriber on stderr, `warn` by default, `debug` with `-v`,
//!    `RUST_LOG` overrides both
//! 3. **Context Setup**: data directory, config and store via [`initialize`]
//! 4. **View Flags**: `--filter` and `--unique` are applied to the API's view before dispatch
//! 5. **Dispatch**: every command goes through [`SheetApi`]
//! 6. **Output**: results are handed to `print.rs`

use super::print::{print_config, print_messages, print_rows, print_stats, print_summary};
use super::setup::{
    AssistantCommands, Cli, Commands, DataCommands, MiscCommands, RowCommands, ViewArgs,
    ViewCommands,
};
use clap::Parser;
use skusheetapp::api::{parse_filter, SheetApi};
use skusheetapp::assistant::client::LlmAssistant;
use skusheetapp::commands::CmdResult;
use skusheetapp::config::SheetConfig;
use skusheetapp::error::{Result, SheetError};
use skusheetapp::init::{initialize, SheetContext};
use skusheetapp::store::StorageBackend;
use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // The template is static, so it must print even when the config file is broken.
    if let Some(Commands::Misc(MiscCommands::Config { template: true })) = &cli.command {
        print!("{}", SheetConfig::template());
        return Ok(());
    }

    let mut ctx = initialize(cli.data.clone())?;
    debug!(rows = ctx.api.rows().len(), "store opened");

    match cli.command {
        None => handle_list(&mut ctx, &ViewArgs::default(), &[]),
        Some(Commands::View(cmd)) => match cmd {
            ViewCommands::List { view, columns } => handle_list(&mut ctx, &view, &columns),
            ViewCommands::Stats { column, view } => {
                apply_view(&mut ctx.api, &view)?;
                let result = ctx.api.stats(&column)?;
                print_messages(&result.messages);
                print_stats(column.trim(), &result.stats);
                Ok(())
            }
        },
        Some(Commands::Row(cmd)) => {
            let result = match cmd {
                RowCommands::Add { values } => ctx.api.add_row(&values)?,
                RowCommands::Edit { row, column, value } => {
                    ctx.api.edit_cell(&row, &column, &value)?
                }
                RowCommands::Update { rows, values } => ctx.api.update_rows(&rows, &values)?,
                RowCommands::Delete { rows } => ctx.api.delete_rows(&rows)?,
                RowCommands::Verify { rows } => ctx.api.verify_rows(&rows)?,
                RowCommands::Unverify { rows } => ctx.api.unverify_rows(&rows)?,
                RowCommands::Images { rows, urls } => ctx.api.insert_images(&rows, &urls)?,
            };
            print_mutation(&result);
            Ok(())
        }
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Import { file } => {
                let result = ctx.api.import_file(&file)?;
                print_messages(&result.messages);
                Ok(())
            }
            DataCommands::Export { view, out } => {
                apply_view(&mut ctx.api, &view)?;
                let out_dir = export_dir(out, &ctx.config)?;
                let result = ctx.api.export(&out_dir)?;
                print_messages(&result.messages);
                Ok(())
            }
            DataCommands::Reset { yes } => {
                if !yes {
                    return Err(SheetError::InvalidInput(
                        "reset deletes every row; run again with --yes".to_string(),
                    ));
                }
                let result = ctx.api.reset()?;
                print_messages(&result.messages);
                Ok(())
            }
        },
        Some(Commands::Assistant(cmd)) => {
            let assistant = LlmAssistant::from_config(&ctx.config)?;
            let result = match cmd {
                AssistantCommands::Extract { file } => {
                    let text = read_source(file.as_deref())?;
                    block_on(ctx.api.extract(&assistant, &text))??
                }
                AssistantCommands::Rename { rows } => {
                    block_on(ctx.api.rename(&assistant, &rows))??
                }
                AssistantCommands::Optimize { rows } => {
                    block_on(ctx.api.optimize(&assistant, &rows))??
                }
            };
            print_mutation(&result);
            Ok(())
        }
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Info => {
                let result = ctx.api.info()?;
                if let Some(summary) = &result.summary {
                    print_summary(summary, &ctx.data_dir);
                }
                Ok(())
            }
            MiscCommands::Config { .. } => {
                print_config(&ctx.config, &ctx.data_dir);
                Ok(())
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_list(ctx: &mut SheetContext, view: &ViewArgs, columns: &[String]) -> Result<()> {
    apply_view(&mut ctx.api, view)?;
    let result = ctx.api.list()?;

    // Columns the view narrows on are always worth seeing.
    let mut shown: Vec<String> = columns.to_vec();
    shown.extend(ctx.api.view().filters().keys().cloned());
    shown.extend(ctx.api.view().unique_columns().iter().cloned());

    print_messages(&result.messages);
    if result.listed_rows.is_empty() && !ctx.api.view().is_empty() {
        println!("No rows match the current view.");
        return Ok(());
    }
    print_rows(&result.listed_rows, &shown);
    Ok(())
}

/// Apply `--filter` then `--unique`. Naming a column in both leaves it in
/// unique mode, since entering unique mode drops that column's filter.
fn apply_view<B: StorageBackend>(api: &mut SheetApi<B>, view: &ViewArgs) -> Result<()> {
    for raw in &view.filters {
        let (column, values) = parse_filter(raw)?;
        api.set_filter(&column, &values);
    }
    for column in &view.unique {
        let column = column.trim();
        if !api.view().is_unique(column) {
            api.toggle_unique(column);
        }
    }
    Ok(())
}

fn print_mutation(result: &CmdResult) {
    print_messages(&result.messages);
    if !result.affected_rows.is_empty() {
        print_rows(&result.affected_rows, &[]);
    }
}

fn export_dir(out: Option<PathBuf>, config: &SheetConfig) -> Result<PathBuf> {
    match out.or_else(|| config.export_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Drive one assistant call to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
