//! Command-line interface for Courier.
//!
//! The board itself is interactive; the CLI only picks the files it runs
//! against and where diagnostics go.

use std::path::PathBuf;

use clap::Parser;

/// Courier — a terminal delivery board.
#[derive(Debug, Parser)]
#[command(name = "courier")]
pub struct Cli {
    /// Deliveries file (TOML). Defaults to `~/.courier/deliveries.toml`;
    /// built-in samples are used when the file does not exist.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Status-label overrides (TOML). Defaults to `~/.courier/labels.toml`.
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// Append diagnostic logs to this file. The terminal belongs to the
    /// board while it runs, so logs never go to stdout.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
