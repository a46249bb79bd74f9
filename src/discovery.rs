// src/discovery.rs
use crate::config::Config;
use crate::lang::Lang;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories that never hold analyzable sources.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    "vendor",
    ".venv",
    "venv",
    "__pycache__",
    ".cache",
    "coverage",
];

fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

/// Walks `root` and returns the analyzable files in sorted order:
/// recognized language extensions only, pruned directories skipped,
/// config ignore patterns applied. Walk errors are logged, not fatal.
pub fn discover(root: &Path, config: &Config) -> Vec<PathBuf> {
    let raw_files = walk_filesystem(root);
    filter_config(raw_files, config)
}

fn walk_filesystem(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !should_prune(&e.file_name().to_string_lossy()));

    let mut paths = Vec::new();
    let mut errors = 0usize;

    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && Lang::from_path(entry.path()).is_some() {
                    let p = entry.path().strip_prefix(".").unwrap_or(entry.path());
                    paths.push(p.to_path_buf());
                }
            }
            Err(e) => {
                log::debug!("walk error: {e}");
                errors += 1;
            }
        }
    }

    if errors > 0 {
        log::warn!("encountered {errors} errors during file walk");
    }

    paths.sort();
    paths
}

fn filter_config(mut paths: Vec<PathBuf>, config: &Config) -> Vec<PathBuf> {
    paths.retain(|p| !config.is_ignored(p));
    paths
}
