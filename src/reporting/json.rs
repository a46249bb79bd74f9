use crate::diagnostics::DiagnosticsStore;
use crate::engine::ScanReport;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Pretty-prints any serializable report value.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// The `check --json` payload: the scan itself plus store-derived
/// aggregates and the pass/fail verdict.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn check_to_json(report: &ScanReport, store: &DiagnosticsStore) -> Result<String> {
    let rules: BTreeMap<&str, usize> = store
        .by_rule()
        .into_iter()
        .map(|(rule, entries)| (rule, entries.len()))
        .collect();

    let value = serde_json::json!({
        "scan": report,
        "rules": rules,
        "errors": store.error_count(),
        "warnings": store.warning_count(),
        "infos": store.info_count(),
        "passed": store.error_count() == 0,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
