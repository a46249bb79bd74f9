// src/bin/linemark.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use linemark_core::cli::{handlers, Cli, Commands};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Diff {
            old,
            new,
            mode,
            json,
        } => handlers::handle_diff(&old, &new, mode, json),
        Commands::Metrics { paths, json } => handlers::handle_metrics(&paths, json),
        Commands::Check { path, json } => {
            let passed = handlers::handle_check(&path, json)?;
            if !passed {
                process::exit(1);
            }
            Ok(())
        }
    }
}
