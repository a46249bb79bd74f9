use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "linemark",
    version,
    about = "Heuristic source analysis: line diffs, code metrics, diagnostics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Line diff between two files
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Presentation mode
        #[arg(long, value_enum, default_value_t = DiffMode::Inline)]
        mode: DiffMode,
        /// Emit JSON instead of the rendered diff
        #[arg(long)]
        json: bool,
    },
    /// Per-file code metrics
    Metrics {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Emit JSON instead of the metrics table
        #[arg(long)]
        json: bool,
    },
    /// Validate discovered files and report diagnostics
    Check {
        /// Root directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Emit JSON instead of the console report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffMode {
    /// Single column with +/- prefixes
    Inline,
    /// Side-by-side columns
    Split,
}
