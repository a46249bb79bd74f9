// src/validate/mod.rs
//! Per-language heuristic validators.
//!
//! These are line and character scans, not parsers. Languages with a
//! native editor language service (TypeScript, JavaScript, JSON, CSS,
//! HTML) have no entry here and validate to nothing.

mod brackets;
mod python;

pub use brackets::validate_brackets;
pub use python::validate_python;

use crate::diagnostics::Diagnostic;
use std::collections::HashMap;
use std::sync::LazyLock;

type ValidatorFn = fn(&str) -> Vec<Diagnostic>;

static REGISTRY: LazyLock<HashMap<&'static str, ValidatorFn>> = LazyLock::new(|| {
    let mut registry: HashMap<&'static str, ValidatorFn> = HashMap::new();
    registry.insert("python", validate_python as ValidatorFn);
    for tag in ["go", "rust", "c", "cpp", "java"] {
        registry.insert(tag, validate_brackets as ValidatorFn);
    }
    registry
});

/// Runs the validator registered for `language` (a lowercase tag such as
/// `"python"` or `"go"`). Unregistered tags validate to an empty list.
#[must_use]
pub fn validate(content: &str, language: &str) -> Vec<Diagnostic> {
    match REGISTRY.get(language) {
        Some(validator) => validator(content),
        None => Vec::new(),
    }
}
