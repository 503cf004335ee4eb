use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "skusheet",
    bin_name = "skusheet",
    version = concat!("v", env!("CARGO_PKG_VERSION")),
    disable_help_subcommand = true,
    after_help = "Rows are addressed by the position `list` shows (1, 2-5) or by an id prefix."
)]
#[command(about = "Clean, deduplicate, filter and re-export product/SKU tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SKUSHEET_HOME, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    View(ViewCommands),

    #[command(flatten)]
    Row(RowCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Assistant(AssistantCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// Filters and unique columns for one invocation.
#[derive(Args, Debug, Default, Clone)]
pub struct ViewArgs {
    /// Keep rows whose COL value is one of the listed values. Use "(空白)" for blanks
    #[arg(long = "filter", short = 'f', value_name = "COL=V1,V2")]
    pub filters: Vec<String>,

    /// Keep the first row for each distinct value of COL
    #[arg(long = "unique", short = 'u', value_name = "COL")]
    pub unique: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// List the visible rows
    #[command(alias = "ls", display_order = 1)]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Extra columns to show next to the defaults
        #[arg(long, short = 'c', value_delimiter = ',', value_name = "COL")]
        columns: Vec<String>,
    },

    /// Count the distinct values of a column over the visible rows
    #[command(display_order = 2)]
    Stats {
        column: String,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum RowCommands {
    /// Append a row
    #[command(display_order = 10)]
    Add {
        /// Initial values
        #[arg(long = "set", short = 's', value_name = "COL=VALUE")]
        values: Vec<String>,
    },

    /// Edit one cell. Product-level columns follow to every row of the product
    #[command(display_order = 11)]
    Edit {
        row: String,
        column: String,
        value: String,
    },

    /// Set cells on several rows at once, only on the rows named
    #[command(display_order = 12)]
    Update {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        rows: Vec<String>,

        #[arg(long = "set", short = 's', required = true, value_name = "COL=VALUE")]
        values: Vec<String>,
    },

    /// Delete rows
    #[command(alias = "rm", display_order = 13)]
    Delete {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        rows: Vec<String>,
    },

    /// Mark rows as 已审核
    #[command(display_order = 14)]
    Verify {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        rows: Vec<String>,
    },

    /// Mark rows as 未审核
    #[command(display_order = 15)]
    Unverify {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        rows: Vec<String>,
    },

    /// Fill the main image slots of rows and their sibling rows
    #[command(display_order = 16)]
    Images {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        rows: Vec<String>,

        #[arg(long = "url", required = true, value_name = "URL")]
        urls: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Import a CSV or spreadsheet file, appending its rows
    #[command(display_order = 20)]
    Import { file: PathBuf },

    /// Export the visible rows to a CSV file
    #[command(display_order = 21)]
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Output directory (defaults to export_dir from config, then the current directory)
        #[arg(long, short, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Delete every row
    #[command(display_order = 22)]
    Reset {
        /// Required, there is no undo
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssistantCommands {
    /// Extract products from text or HTML (reads stdin without FILE)
    #[command(display_order = 30)]
    Extract { file: Option<PathBuf> },

    /// Suggest marketplace-style product titles (all rows without ROWS)
    #[command(display_order = 31)]
    Rename {
        #[arg(value_delimiter = ',')]
        rows: Vec<String>,
    },

    /// Normalize SKU specs (all rows without ROWS)
    #[command(display_order = 32)]
    Optimize {
        #[arg(value_delimiter = ',')]
        rows: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show table counts and the last save time
    #[command(display_order = 40)]
    Info,

    /// Show the effective configuration
    #[command(display_order = 41)]
    Config {
        /// Print a commented skusheet.toml instead
        #[arg(long)]
        template: bool,
    },
}
