//! eda-cli - Exploratory profiling of tabular datasets
//!
//! Command-line entry point.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    eda_cli::cli::run()
}
