//! Command-line definition (clap derive).

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Fetch random user records and view their locations as a table.
#[derive(Parser, Debug)]
#[command(name = "whereabouts", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', global = true, env = "WHEREABOUTS_PROFILE")]
    pub profile: Option<String>,

    /// API endpoint override (e.g. a self-hosted generator)
    #[arg(long, global = true, env = "WHEREABOUTS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Number of records to request
    #[arg(long, short = 'n', global = true)]
    pub results: Option<u32>,

    /// Seed string for a reproducible dataset
    #[arg(long, global = true)]
    pub seed: Option<String>,

    /// Comma-separated nationality filter (e.g. "us,gb")
    #[arg(long, global = true)]
    pub nat: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Suppress the summary line and non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (tabled)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// One city per line
    Plain,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch records and print the flattened location table
    Fetch(FetchArgs),

    /// Fetch one page and print the discovered column names
    Columns,

    /// Manage the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Keep only rows whose concatenated values contain this text
    /// (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort by a column, optionally with a direction:
    /// COLUMN, COLUMN:asc, or COLUMN:desc (default desc)
    #[arg(long, value_name = "COLUMN[:DIR]")]
    pub sort_by: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the resolved configuration
    Show,
    /// Write a starter config file
    Init,
}
