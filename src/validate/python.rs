//! Line-scanning Python validator.

use crate::diagnostics::{Diagnostic, Severity};

const SOURCE: &str = "python";
const TRIPLE_DOUBLE: &str = "\"\"\"";
const TRIPLE_SINGLE: &str = "'''";

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "def", "class", "try", "except", "finally", "with",
];

/// Validates Python source with three per-line checks: missing trailing
/// colons on control statements, single-line bracket balance, and
/// non-multiple-of-4 space indentation. Content inside triple-quoted
/// multiline strings is skipped entirely.
#[must_use]
pub fn validate_python(content: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut multiline_quote: Option<&'static str> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;

        // An odd count of the opening quote style closes the string; the
        // closing line itself stays exempt from the other checks.
        if let Some(quote) = multiline_quote {
            if count_unescaped(line, quote) % 2 == 1 {
                multiline_quote = None;
            }
            continue;
        }

        if count_unescaped(line, TRIPLE_DOUBLE) % 2 == 1 {
            multiline_quote = Some(TRIPLE_DOUBLE);
            continue;
        }
        if count_unescaped(line, TRIPLE_SINGLE) % 2 == 1 {
            multiline_quote = Some(TRIPLE_SINGLE);
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        check_missing_colon(trimmed, line_no, &mut diagnostics);
        check_line_brackets(line, line_no, &mut diagnostics);
        check_indentation(line, line_no, &mut diagnostics);
    }

    diagnostics
}

/// Counts occurrences of `pattern` not preceded by a backslash.
fn count_unescaped(line: &str, pattern: &str) -> usize {
    let bytes = line.as_bytes();
    let mut count = 0;
    let mut from = 0;

    while let Some(pos) = line[from..].find(pattern) {
        let abs = from + pos;
        if abs == 0 || bytes[abs - 1] != b'\\' {
            count += 1;
        }
        from = abs + pattern.len();
    }

    count
}

fn control_keyword(trimmed: &str) -> Option<&'static str> {
    CONTROL_KEYWORDS.iter().copied().find(|kw| {
        trimmed == *kw
            || trimmed
                .strip_prefix(kw)
                .is_some_and(|rest| rest.starts_with([' ', '(', ':']))
    })
}

fn check_missing_colon(trimmed: &str, line_no: usize, diagnostics: &mut Vec<Diagnostic>) {
    let Some(keyword) = control_keyword(trimmed) else {
        return;
    };
    if !trimmed.ends_with(':') {
        diagnostics.push(
            Diagnostic::new(
                format!("Missing colon after '{keyword}' statement"),
                Severity::Error,
                line_no,
            )
            .with_source(SOURCE),
        );
    }
}

/// Bracket balance within a single line, via a stack of expected closers.
/// Brackets left open at end of line are legitimate continuations in
/// Python and are not flagged.
fn check_line_brackets(line: &str, line_no: usize, diagnostics: &mut Vec<Diagnostic>) {
    let mut stack: Vec<char> = Vec::new();

    for (col, ch) in line.chars().enumerate() {
        let expected = match ch {
            '(' => Some(')'),
            '[' => Some(']'),
            '{' => Some('}'),
            _ => None,
        };
        if let Some(closer) = expected {
            stack.push(closer);
            continue;
        }

        if matches!(ch, ')' | ']' | '}') {
            match stack.pop() {
                None => diagnostics.push(
                    Diagnostic::new(
                        format!("Unexpected closing bracket '{ch}'"),
                        Severity::Error,
                        line_no,
                    )
                    .with_columns(col + 1, col + 2)
                    .with_source(SOURCE),
                ),
                Some(expected) if expected != ch => diagnostics.push(
                    Diagnostic::new(
                        format!("Mismatched bracket: expected '{expected}', found '{ch}'"),
                        Severity::Error,
                        line_no,
                    )
                    .with_columns(col + 1, col + 2)
                    .with_source(SOURCE),
                ),
                Some(_) => {}
            }
        }
    }
}

fn check_indentation(line: &str, line_no: usize, diagnostics: &mut Vec<Diagnostic>) {
    if line.starts_with('\t') {
        return;
    }
    let spaces = line.len() - line.trim_start_matches(' ').len();
    if spaces > 0 && spaces % 4 != 0 {
        diagnostics.push(
            Diagnostic::new(
                format!("Indentation of {spaces} spaces is not a multiple of 4"),
                Severity::Warning,
                line_no,
            )
            .with_source(SOURCE),
        );
    }
}
