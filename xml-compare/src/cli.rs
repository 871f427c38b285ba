use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xml-compare")]
#[command(about = "Compare XML documents semantically")]
pub struct Cli {
    /// Log comparison progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare two XML files and show differences.
    Diff(DiffArgs),
    /// Show the node tree the comparer sees for one XML file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    pub file1: PathBuf,
    pub file2: PathBuf,
    /// TOML file with a [compare] table of ignore_* options.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub ignore: IgnoreFlags,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print only difference counts.
    #[arg(long)]
    pub summary: bool,
    /// Exit with status 1 when the documents differ.
    #[arg(long)]
    pub exit_code: bool,
}

/// Tolerances enabled on the command line, on top of any config file.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct IgnoreFlags {
    /// Ignore namespace-URI differences.
    #[arg(long)]
    pub ignore_namespace: bool,
    /// Ignore namespace-prefix differences.
    #[arg(long)]
    pub ignore_prefix: bool,
    /// Match child elements by name instead of position.
    #[arg(long)]
    pub ignore_child_order: bool,
    /// Match attributes by name instead of position.
    #[arg(long)]
    pub ignore_attribute_order: bool,
    /// Skip comment nodes.
    #[arg(long)]
    pub ignore_comments: bool,
    /// Skip CDATA sections.
    #[arg(long)]
    pub ignore_cdata: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
