use crate::cli::DiffMode;
use crate::config::Config;
use crate::diagnostics::DiagnosticsStore;
use crate::diff;
use crate::discovery;
use crate::engine::AnalysisEngine;
use crate::metrics;
use crate::reporting::{console, json};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Diffs two files and prints the result in the requested mode.
///
/// # Errors
/// Returns an error if either file cannot be read.
pub fn handle_diff(old: &Path, new: &Path, mode: DiffMode, as_json: bool) -> Result<()> {
    let original = fs::read_to_string(old)
        .with_context(|| format!("failed to read {}", old.display()))?;
    let current = fs::read_to_string(new)
        .with_context(|| format!("failed to read {}", new.display()))?;

    let lines = diff::diff(&original, &current);

    match (mode, as_json) {
        (DiffMode::Inline, true) => println!("{}", json::to_json(&lines)?),
        (DiffMode::Inline, false) => console::print_diff(&lines),
        (DiffMode::Split, true) => println!("{}", json::to_json(&diff::split_rows(&lines))?),
        (DiffMode::Split, false) => console::print_split(&diff::split_rows(&lines)),
    }
    Ok(())
}

/// Computes and prints metrics for each given file.
///
/// # Errors
/// Returns an error if any file cannot be read.
pub fn handle_metrics(paths: &[PathBuf], as_json: bool) -> Result<()> {
    let mut all = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        all.push(metrics::calculate(&content, &path.to_string_lossy()));
    }

    if as_json {
        println!("{}", json::to_json(&all)?);
    } else {
        console::print_metrics(&all);
    }
    Ok(())
}

/// Discovers, scans, and reports on `root`. Returns whether the run
/// passed (no error-severity diagnostics).
///
/// # Errors
/// Returns an error if the config file is malformed or output fails.
pub fn handle_check(root: &Path, as_json: bool) -> Result<bool> {
    let config = Config::load(root)?;
    let files = discovery::discover(root, &config);
    log::debug!("discovered {} files under {}", files.len(), root.display());

    let engine = AnalysisEngine::new(config.clone());
    let mut store = DiagnosticsStore::new();
    let report = engine.scan_into(&files, &mut store);

    if as_json || config.output.json {
        println!("{}", json::check_to_json(&report, &store)?);
    } else {
        console::print_report(&report, &store);
    }

    Ok(store.error_count() == 0)
}
