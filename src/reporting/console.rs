use crate::diagnostics::{Diagnostic, DiagnosticsStore, Severity};
use crate::diff::{DiffKind, DiffLine, SplitRow};
use crate::engine::ScanReport;
use crate::metrics::{ComplexityRating, FileMetrics};
use colored::Colorize;

/// Prints the scan report: diagnostics grouped by file in path order, a
/// per-rule tally, and a summary line.
pub fn print_report(report: &ScanReport, store: &DiagnosticsStore) {
    for (path, diagnostics) in store.by_file() {
        if diagnostics.is_empty() {
            continue;
        }
        println!("{}", path.bold());
        for d in diagnostics {
            print_diagnostic(path, d);
        }
        println!();
    }

    print_rule_tally(store);
    print_summary(report);
}

fn print_diagnostic(path: &str, d: &Diagnostic) {
    let label = match d.severity {
        Severity::Error => d.severity.label().red().bold(),
        Severity::Warning => d.severity.label().yellow(),
        Severity::Info | Severity::Hint => d.severity.label().dimmed(),
    };
    println!("  {label}: {}", d.message);

    let location = match d.start_column {
        Some(col) => format!("{path}:{}:{col}", d.start_line),
        None => format!("{path}:{}", d.start_line),
    };
    println!("  {} {location}", "-->".blue());

    if let Some(ref source) = d.source {
        println!("   {} source: {source}", "=".blue());
    }
}

fn print_rule_tally(store: &DiagnosticsStore) {
    let groups = store.by_rule();
    if groups.is_empty() {
        return;
    }
    let parts: Vec<String> = groups
        .iter()
        .map(|(rule, entries)| format!("{rule}: {}", entries.len()))
        .collect();
    println!("{} {}", "rules:".dimmed(), parts.join(", ").dimmed());
}

fn print_summary(report: &ScanReport) {
    let errors = report.error_count();
    let warnings = report.warning_count();
    let infos = report.info_count();
    let duration = report.duration_ms;

    if errors == 0 && warnings == 0 && infos == 0 {
        println!(
            "{} No issues in {} {} ({duration}ms).",
            "OK".green().bold(),
            report.files.len(),
            pluralize("file", report.files.len())
        );
        return;
    }

    let mut parts: Vec<String> = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} {}", pluralize("error", errors)));
    }
    if warnings > 0 {
        parts.push(format!("{warnings} {}", pluralize("warning", warnings)));
    }
    if infos > 0 {
        parts.push(format!("{infos} {}", pluralize("info", infos)));
    }
    let summary = parts.join(", ");

    if errors > 0 {
        println!("{} Found {summary} ({duration}ms).", "X".red().bold());
    } else {
        println!("{} Found {summary} ({duration}ms).", "~".yellow().bold());
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Prints per-file metrics with complexity-colored function lines.
pub fn print_metrics(all: &[FileMetrics]) {
    for m in all {
        println!("{}", m.file_path.bold());
        println!(
            "  lines: {} total ({} code, {} comment, {} blank)",
            m.total_lines, m.code_lines, m.comment_lines, m.blank_lines
        );
        println!("  imports: {}", m.import_count);

        if m.functions.is_empty() {
            println!("  functions: none");
        } else {
            println!("  functions: {}", m.functions.len());
            for f in &m.functions {
                let line = format!(
                    "    {} (lines {}-{}, complexity {})",
                    f.name, f.start_line, f.end_line, f.cyclomatic_complexity
                );
                println!("{}", colorize_by_rating(&line, f.cyclomatic_complexity));
            }
            println!(
                "  average complexity: {:.1}, max: {}",
                m.average_complexity, m.max_complexity
            );
        }
        println!();
    }
}

fn colorize_by_rating(line: &str, complexity: u32) -> colored::ColoredString {
    match ComplexityRating::of(complexity) {
        ComplexityRating::Low => line.green(),
        ComplexityRating::Medium => line.yellow(),
        ComplexityRating::High => line.red(),
        ComplexityRating::VeryHigh => line.red().bold(),
    }
}

/// Prints an inline diff with `+`/`-` markers and colors.
pub fn print_diff(lines: &[DiffLine]) {
    for line in lines {
        match line.kind {
            DiffKind::Unchanged => println!("  {}", line.text),
            DiffKind::Added => println!("{}", format!("+ {}", line.text).green()),
            DiffKind::Removed => println!("{}", format!("- {}", line.text).red()),
        }
    }
}

/// Prints a side-by-side diff; blank cells mark added/removed placeholders.
pub fn print_split(rows: &[SplitRow]) {
    let width = rows
        .iter()
        .filter_map(|r| r.left.as_ref().map(|l| l.text.len()))
        .max()
        .unwrap_or(0)
        .clamp(8, 60);

    for row in rows {
        let left = row.left.as_ref().map_or("", |l| l.text.as_str());
        let right = row.right.as_ref().map_or("", |r| r.text.as_str());

        let gutter = match (&row.left, &row.right) {
            (Some(_), None) => "<".red().to_string(),
            (None, Some(_)) => ">".green().to_string(),
            _ => "|".dimmed().to_string(),
        };
        println!("{left:<width$} {gutter} {right}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_handles_singular_and_plural() {
        assert_eq!(pluralize("error", 1), "error");
        assert_eq!(pluralize("error", 2), "errors");
    }
}
