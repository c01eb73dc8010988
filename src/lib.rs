//! Yolobalance: class-balanced subsetting for YOLO-format datasets.
//!
//! Object-detection datasets are rarely balanced: dashcam footage is full of
//! cars and nearly empty of trains. Yolobalance catalogs which classes appear
//! in which images, draws a per-class random sample against configurable
//! target counts, and copies the selected image/label pairs into a fresh
//! `images/<split>/` + `labels/<split>/` tree.
//!
//! # Modules
//!
//! - [`balance`]: the catalog → select → materialize pipeline
//! - [`catalog`], [`select`], [`materialize`]: the individual stages
//! - [`distribution`]: class-distribution inspection for a label directory
//! - [`config`]: class table and sampling target configuration
//! - [`error`]: error types for yolobalance operations

pub mod balance;
pub mod catalog;
pub mod config;
pub mod distribution;
pub mod error;
pub mod labels;
pub mod materialize;
pub mod select;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::BalanceError;

use balance::{balance_dataset, BalanceOptions};
use config::{ClassTable, SamplingTargets};
use distribution::{check_distribution, DistributionOptions};

/// The yolobalance CLI application.
#[derive(Parser)]
#[command(name = "yolobalance")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create a class-balanced subset of a YOLO dataset.
    Balance(BalanceArgs),
    /// Report the class distribution of a label directory.
    Check(CheckArgs),
}

/// Arguments for the balance subcommand.
#[derive(clap::Args)]
struct BalanceArgs {
    /// Directory containing the source images.
    #[arg(long)]
    images: PathBuf,

    /// Directory containing the YOLO .txt label files.
    #[arg(long)]
    labels: PathBuf,

    /// Class table file (data.yaml with a 'names:' key, or classes.txt).
    #[arg(long)]
    classes: PathBuf,

    /// Sampling targets file (YAML mapping of class name to image count).
    #[arg(long)]
    targets: PathBuf,

    /// Root directory for the balanced output tree.
    #[arg(long)]
    output: PathBuf,

    /// Split label for the output tree, e.g. 'train' or 'val'.
    #[arg(long)]
    split: String,

    /// Seed for the selection stage. Omitted: an entropy seed is drawn and
    /// recorded in the report.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Directory containing the YOLO .txt label files.
    #[arg(long)]
    labels: PathBuf,

    /// Class table file (data.yaml with a 'names:' key, or classes.txt).
    #[arg(long)]
    classes: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the yolobalance CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BalanceError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Balance(args)) => run_balance(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("yolobalance {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Class-balanced subsetting for YOLO-format datasets.");
            println!();
            println!("Run 'yolobalance --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the balance subcommand.
fn run_balance(args: BalanceArgs) -> Result<(), BalanceError> {
    let class_table = ClassTable::load(&args.classes)?;
    let targets = SamplingTargets::load(&args.targets)?;

    // Progress goes to stderr so piped report output stays clean.
    eprintln!(
        "Balancing split '{}': {} target class(es), labels from {}",
        args.split,
        targets.len(),
        args.labels.display()
    );

    let opts = BalanceOptions {
        image_dir: args.images,
        label_dir: args.labels,
        output_dir: args.output.clone(),
        split: args.split,
        seed: args.seed,
    };
    let report = balance_dataset(&class_table, &targets, &opts)?;

    eprintln!(
        "Copied {} pair(s) into {}",
        report.materialize.copied,
        args.output.display()
    );

    print_report(&args.report, &report, |r| format!("{r}"))
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), BalanceError> {
    let class_table = ClassTable::load(&args.classes)?;

    let report = check_distribution(&args.labels, &class_table, &DistributionOptions::default())?;

    print_report(&args.report, &report, |r| format!("{r}"))
}

/// Print a report in the requested format.
fn print_report<T: serde::Serialize>(
    format: &str,
    report: &T,
    text: impl Fn(&T) -> String,
) -> Result<(), BalanceError> {
    match format {
        "json" => {
            let rendered = serde_json::to_string_pretty(report)
                .map_err(|source| std::io::Error::new(std::io::ErrorKind::InvalidData, source))?;
            println!("{rendered}");
        }
        _ => print!("{}", text(report)),
    }
    Ok(())
}
