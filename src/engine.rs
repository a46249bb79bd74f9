// src/engine.rs
//! Scan orchestration: metrics, validation, and the complexity lint over
//! a set of files.

use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticsStore, Severity};
use crate::lang::Lang;
use crate::metrics::{self, FileMetrics};
use crate::validate;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Analysis results for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'static str>,
    pub metrics: FileMetrics,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileAnalysis {
    /// Returns true if no diagnostics were produced.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Aggregated results from scanning multiple files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileAnalysis>,
    pub total_lines: usize,
    pub total_functions: usize,
    pub duration_ms: u128,
}

impl ScanReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count_severity(|s| s == Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count_severity(|s| s == Severity::Warning)
    }

    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count_severity(|s| s == Severity::Info || s == Severity::Hint)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    #[must_use]
    pub fn clean_file_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_clean()).count()
    }

    fn count_severity(&self, matches: impl Fn(Severity) -> bool) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.diagnostics)
            .filter(|d| matches(d.severity))
            .count()
    }
}

pub struct AnalysisEngine {
    config: Config,
}

impl AnalysisEngine {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Analyzes every file in parallel. Unreadable files are logged and
    /// skipped, never fatal.
    #[must_use]
    pub fn scan(&self, files: &[PathBuf]) -> ScanReport {
        let start = std::time::Instant::now();

        let results: Vec<FileAnalysis> = files
            .par_iter()
            .filter_map(|path| self.analyze_file(path))
            .collect();

        let total_lines = results.iter().map(|r| r.metrics.total_lines).sum();
        let total_functions = results.iter().map(|r| r.metrics.functions.len()).sum();

        ScanReport {
            files: results,
            total_lines,
            total_functions,
            duration_ms: start.elapsed().as_millis(),
        }
    }

    /// Scans and records every file's diagnostics in `store`, one entry
    /// per path, replacing whatever the store held for those paths.
    pub fn scan_into(&self, files: &[PathBuf], store: &mut DiagnosticsStore) -> ScanReport {
        let report = self.scan(files);
        for file in &report.files {
            store.set_file_diagnostics(
                file.path.to_string_lossy().into_owned(),
                file.diagnostics.clone(),
            );
        }
        report
    }

    fn analyze_file(&self, path: &Path) -> Option<FileAnalysis> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                return None;
            }
        };
        Some(self.analyze_content(path, &content, Lang::from_path(path)))
    }

    /// The pure per-file pipeline: metrics, the language validator, and
    /// the over-complexity lint, all over in-memory content.
    #[must_use]
    pub fn analyze_content(&self, path: &Path, content: &str, lang: Option<Lang>) -> FileAnalysis {
        let file_metrics = metrics::calculate(content, &path.to_string_lossy());

        let mut diagnostics = match lang {
            Some(l) => validate::validate(content, l.tag()),
            None => Vec::new(),
        };
        diagnostics.extend(self.complexity_lint(&file_metrics));

        FileAnalysis {
            path: path.to_path_buf(),
            language: lang.map(Lang::tag),
            metrics: file_metrics,
            diagnostics,
        }
    }

    fn complexity_lint(&self, file_metrics: &FileMetrics) -> Vec<Diagnostic> {
        let limit = self.config.rules.max_complexity;
        file_metrics
            .functions
            .iter()
            .filter(|f| f.cyclomatic_complexity > limit)
            .map(|f| {
                Diagnostic::new(
                    format!(
                        "Function '{}' has cyclomatic complexity {} (limit: {limit})",
                        f.name, f.cyclomatic_complexity
                    ),
                    self.config.rules.complexity_severity,
                    f.start_line,
                )
                .spanning(f.end_line)
                .with_source("complexity")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use std::fs;

    fn engine_with_limit(max_complexity: u32) -> AnalysisEngine {
        AnalysisEngine::new(Config {
            rules: RuleConfig {
                max_complexity,
                ..RuleConfig::default()
            },
            output: crate::config::OutputConfig::default(),
        })
    }

    #[test]
    fn complexity_lint_fires_above_the_limit() {
        let engine = engine_with_limit(2);
        let content = "function busy(a, b) {\n  if (a) { return 1; }\n  if (b) { return 2; }\n  return 3;\n}";
        let analysis =
            engine.analyze_content(Path::new("busy.js"), content, Some(Lang::JavaScript));

        let lint: Vec<&Diagnostic> = analysis
            .diagnostics
            .iter()
            .filter(|d| d.source.as_deref() == Some("complexity"))
            .collect();
        assert_eq!(lint.len(), 1);
        assert_eq!(lint[0].severity, Severity::Warning);
        assert_eq!(lint[0].start_line, 1);
        assert!(lint[0].message.contains("busy"));
    }

    #[test]
    fn complexity_lint_is_quiet_at_or_below_the_limit() {
        let engine = engine_with_limit(10);
        let content = "function calm() {\n  return 1;\n}";
        let analysis =
            engine.analyze_content(Path::new("calm.js"), content, Some(Lang::JavaScript));
        assert!(analysis.is_clean());
    }

    #[test]
    fn validator_and_lint_diagnostics_combine() {
        let engine = engine_with_limit(10);
        let analysis =
            engine.analyze_content(Path::new("broken.py"), "if x\n    y = 1", Some(Lang::Python));

        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(analysis.diagnostics[0].source.as_deref(), Some("python"));
        assert_eq!(analysis.metrics.total_lines, 2);
    }

    #[test]
    fn scan_skips_unreadable_files() {
        let engine = engine_with_limit(10);
        let report = engine.scan(&[PathBuf::from("/no/such/file.py")]);
        assert!(report.files.is_empty());
        assert_eq!(report.total_lines, 0);
    }

    #[test]
    fn scan_aggregates_totals() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        fs::write(&a, "function f() {\n  return 1;\n}\n").expect("write");
        fs::write(&b, "const x = 1;\nconst y = 2;\n").expect("write");

        let engine = engine_with_limit(10);
        let report = engine.scan(&[a, b]);

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.total_lines, 5);
        assert_eq!(report.total_functions, 1);
    }

    #[test]
    fn scan_into_fills_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bad = dir.path().join("bad.py");
        fs::write(&bad, "if x\n    pass\n").expect("write");

        let engine = engine_with_limit(10);
        let mut store = DiagnosticsStore::new();
        let report = engine.scan_into(&[bad.clone()], &mut store);

        assert!(report.has_errors());
        assert_eq!(store.error_count(), 1);
        assert_eq!(
            store
                .get_file_diagnostics(&bad.to_string_lossy())
                .len(),
            1
        );
        assert!(store.by_rule().contains_key("python"));
    }
}
