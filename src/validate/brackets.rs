//! Whole-content bracket matcher for brace-delimited languages.

use crate::diagnostics::{Diagnostic, Severity};

const SOURCE: &str = "brackets";

struct OpenBracket {
    opener: char,
    expected: char,
    line: usize,
    column: usize,
}

/// Scans every character of every line with a stack of expected closers.
/// A closer with nothing open is "unexpected"; a closer that doesn't match
/// the innermost open bracket is "mismatched" and spans from the opener's
/// line to the closer's; anything still open at end of input is "unclosed"
/// on the line where it was opened.
#[must_use]
pub fn validate_brackets(content: &str) -> Vec<Diagnostic> {
    let mut stack: Vec<OpenBracket> = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        for (col, ch) in line.chars().enumerate() {
            match ch {
                '(' | '[' | '{' => stack.push(OpenBracket {
                    opener: ch,
                    expected: closer_for(ch),
                    line: line_no,
                    column: col + 1,
                }),
                ')' | ']' | '}' => match stack.pop() {
                    None => diagnostics.push(
                        Diagnostic::new(
                            format!("Unexpected closing bracket '{ch}'"),
                            Severity::Error,
                            line_no,
                        )
                        .with_columns(col + 1, col + 2)
                        .with_source(SOURCE),
                    ),
                    Some(open) if open.expected != ch => diagnostics.push(
                        Diagnostic::new(
                            format!(
                                "Mismatched bracket: '{}' expects '{}', found '{ch}'",
                                open.opener, open.expected
                            ),
                            Severity::Error,
                            open.line,
                        )
                        .spanning(line_no)
                        .with_columns(open.column, col + 2)
                        .with_source(SOURCE),
                    ),
                    Some(_) => {}
                },
                _ => {}
            }
        }
    }

    for open in stack {
        diagnostics.push(
            Diagnostic::new(
                format!("Unclosed bracket '{}'", open.opener),
                Severity::Error,
                open.line,
            )
            .with_columns(open.column, open.column + 1)
            .with_source(SOURCE),
        );
    }

    diagnostics
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}
