//! Diagnostic records and the per-file store consumed by frontends.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Maps the numeric marker severities emitted by embedding editors
    /// (8/4/2/1) onto this enum. Unknown codes degrade to `Info`.
    #[must_use]
    pub fn from_marker_code(code: u8) -> Self {
        match code {
            8 => Self::Error,
            4 => Self::Warning,
            1 => Self::Hint,
            _ => Self::Info,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Hint => "hint",
        }
    }
}

/// A single finding against a file. Lines are 1-based; columns are
/// optional 1-based refinements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Diagnostic {
    /// Creates a single-line diagnostic without column information.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity, line: usize) -> Self {
        Self {
            message: message.into(),
            severity,
            start_line: line,
            end_line: line,
            start_column: None,
            end_column: None,
            source: None,
        }
    }

    #[must_use]
    pub fn spanning(mut self, end_line: usize) -> Self {
        self.end_line = end_line;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, start: usize, end: usize) -> Self {
        self.start_column = Some(start);
        self.end_column = Some(end);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// The grouping key used by rule-oriented views.
    #[must_use]
    pub fn rule_key(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}

/// In-memory mapping from file path to that file's current diagnostics.
///
/// The store holds exactly one list per path; a new validation pass for a
/// file replaces its previous list wholesale. Derived views are pure
/// recomputations over the mapping. The store is a plain value owned by
/// its caller; share it by reference, not through a global.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticsStore {
    files: BTreeMap<String, Vec<Diagnostic>>,
}

impl DiagnosticsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire diagnostic list for `path`. Never merges.
    pub fn set_file_diagnostics(&mut self, path: impl Into<String>, diagnostics: Vec<Diagnostic>) {
        self.files.insert(path.into(), diagnostics);
    }

    /// Removes the entry for `path` entirely.
    pub fn clear_file_diagnostics(&mut self, path: &str) {
        self.files.remove(path);
    }

    /// Resets the mapping to empty.
    pub fn clear_all(&mut self) {
        self.files.clear();
    }

    /// Returns the current list for `path`, or an empty slice if the file
    /// has no entry.
    #[must_use]
    pub fn get_file_diagnostics(&self, path: &str) -> &[Diagnostic] {
        self.files.get(path).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count_severity(|s| s == Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count_severity(|s| s == Severity::Warning)
    }

    /// Hints are counted together with infos.
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count_severity(|s| s == Severity::Info || s == Severity::Hint)
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates entries in path order.
    pub fn by_file(&self) -> impl Iterator<Item = (&str, &[Diagnostic])> + '_ {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Regroups every diagnostic across all files by its `source`, with
    /// sourceless diagnostics under `"unknown"`.
    #[must_use]
    pub fn by_rule(&self) -> BTreeMap<&str, Vec<(&str, &Diagnostic)>> {
        let mut groups: BTreeMap<&str, Vec<(&str, &Diagnostic)>> = BTreeMap::new();
        for (path, diagnostics) in &self.files {
            for d in diagnostics {
                groups.entry(d.rule_key()).or_default().push((path, d));
            }
        }
        groups
    }

    fn count_severity(&self, matches: impl Fn(Severity) -> bool) -> usize {
        self.files
            .values()
            .flatten()
            .filter(|d| matches(d.severity))
            .count()
    }
}
