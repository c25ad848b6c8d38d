//! eda-cli CLI - Exploratory Profiling of Tabular Data
//!
//! Command-line interface over the profiling functions.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod basic;
mod profile;

pub use basic::OutputFormat;

/// eda-cli - Exploratory profiling of tabular datasets
#[derive(Parser)]
#[command(name = "eda-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize every column (counts, uniques, examples, statistics)
    Overview {
        /// Path to dataset file (Parquet/CSV/JSON)
        path: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Missing values per column
    Missing {
        /// Path to dataset file (Parquet/CSV/JSON)
        path: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Pearson correlation between numeric columns
    Correlation {
        /// Path to dataset file (Parquet/CSV/JSON)
        path: PathBuf,
        /// Minimum |r| for a pair to be listed (0.0 to 1.0)
        #[arg(short, long, default_value = "0.5")]
        threshold: f64,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Most frequent values of text and boolean columns
    Top {
        /// Path to dataset file (Parquet/CSV/JSON)
        path: PathBuf,
        /// Maximum number of columns to report
        #[arg(long, default_value = "5")]
        max_columns: usize,
        /// Values per column
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Data-quality flags and overall score
    Quality {
        /// Path to dataset file (Parquet/CSV/JSON)
        path: PathBuf,
        /// Config preset (default, strict, lenient)
        #[arg(short, long, default_value = "default")]
        preset: String,
        /// JSON config file; absent fields keep their defaults
        #[arg(short, long, conflicts_with = "preset")]
        config: Option<PathBuf>,
        /// Extra name token marking identifier columns (repeatable)
        #[arg(long = "id-token")]
        id_tokens: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the eda-cli CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Overview { path, format } => profile::cmd_overview(&path, format),
        Commands::Missing { path, format } => profile::cmd_missing(&path, format),
        Commands::Correlation {
            path,
            threshold,
            format,
        } => profile::cmd_correlation(&path, threshold, format),
        Commands::Top {
            path,
            max_columns,
            top_k,
            format,
        } => profile::cmd_top(&path, max_columns, top_k, format),
        Commands::Quality {
            path,
            preset,
            config,
            id_tokens,
            format,
        } => profile::cmd_quality(&path, &preset, config.as_deref(), &id_tokens, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
