use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xml_compare::config::{enable, load_compare_options};
use xml_compare::inspect::render_tree;
use xml_compare::report::{render_summary, render_text};
use xml_compare_core::{format_json, parse_file, CompareOptions, Comparer};

mod cli;

use cli::{Cli, Command, DiffArgs, IgnoreFlags, InspectArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Diff(args) => run_diff(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_diff(args: DiffArgs) -> Result<()> {
    let left = parse_file(&args.file1)
        .with_context(|| format!("failed to parse {}", args.file1.display()))?;
    let right = parse_file(&args.file2)
        .with_context(|| format!("failed to parse {}", args.file2.display()))?;

    let base = match &args.config {
        Some(path) => load_compare_options(path)?,
        None => CompareOptions::default(),
    };
    let opts = enable(base, flag_options(args.ignore));
    debug!(?opts, "resolved compare options");

    let differences = Comparer::new(opts)
        .differences(Some(&left), Some(&right))
        .with_context(|| {
            format!(
                "failed to compare {} with {}",
                args.file1.display(),
                args.file2.display()
            )
        })?;

    if args.summary {
        println!("{}", render_summary(&differences));
    } else {
        match args.format {
            OutputFormat::Text => println!("{}", render_text(&differences)),
            OutputFormat::Json => println!("{}", format_json(&differences)),
        }
    }

    if args.exit_code && !differences.is_empty() {
        bail!("documents differ: {} difference(s)", differences.len());
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let node = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    print!("{}", render_tree(&node, args.depth));
    Ok(())
}

fn flag_options(flags: IgnoreFlags) -> CompareOptions {
    CompareOptions {
        ignore_namespace: flags.ignore_namespace,
        ignore_prefix: flags.ignore_prefix,
        ignore_child_node_order: flags.ignore_child_order,
        ignore_attribute_order: flags.ignore_attribute_order,
        ignore_comments: flags.ignore_comments,
        ignore_cdata: flags.ignore_cdata,
    }
}
