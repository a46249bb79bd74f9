//! Heuristic code metrics over raw text.
//!
//! Everything here is line- and regex-oriented, not a parser: comment
//! markers or braces inside string literals are miscounted, and
//! single-expression arrow functions have no brace body for the extent
//! scan to find. That behavior is the contract; callers wanting exact
//! results need a tokenizer, not this module.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Per-function measurements extracted from one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionMetric {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub line_count: usize,
    pub cyclomatic_complexity: u32,
}

/// Line breakdown and function metrics for a single text blob.
///
/// `total_lines == code_lines + blank_lines + comment_lines` holds for any
/// input; a blank-looking line inside a block comment counts as a comment
/// line, not blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetrics {
    pub file_path: String,
    pub total_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub code_lines: usize,
    pub import_count: usize,
    pub functions: Vec<FunctionMetric>,
    pub average_complexity: f64,
    pub max_complexity: u32,
}

/// Display bucket for a complexity value. Used for report coloring only,
/// never for decision logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityRating {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityRating {
    #[must_use]
    pub fn of(complexity: u32) -> Self {
        match complexity {
            0..=5 => Self::Low,
            6..=10 => Self::Medium,
            11..=20 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very-high",
        }
    }
}

// Declaration shapes, tried in order; first match per line wins.
static FN_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][A-Za-z0-9_$]*)?\s*\(")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FN_CONST_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s*)?(?:\([^)]*\)|[A-Za-z_$][A-Za-z0-9_$]*)\s*=>")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FN_PROPERTY_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_$][A-Za-z0-9_$]*)\s*:\s*(?:async\s*)?\([^)]*\)\s*=>")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FN_METHOD_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+)?(?:static\s+)?([A-Za-z_$][A-Za-z0-9_$]*)\s*\([^)]*\)\s*\{")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

// Keywords the method-shorthand shape would otherwise swallow.
const NOT_METHOD_NAMES: &[&str] = &[
    "if", "else", "for", "while", "switch", "catch", "return", "function",
];

static DECISION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bif\s*\(",
        r"\belse\s+if\s*\(",
        r"\bwhile\s*\(",
        r"\bfor\s*\(",
        r"\bfor\s+of\s*\(",
        r"\bfor\s+in\s*\(",
        r"\bcase\s",
        r"\bcatch\s*\(",
        r"\?[^:]",
        r"&&",
        r"\|\|",
        r"\?\?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap_or_else(|_| panic!("Invalid Regex")))
    .collect()
});

/// Computes the full metrics breakdown for a text blob.
#[must_use]
pub fn calculate(code: &str, file_path: &str) -> FileMetrics {
    let lines: Vec<&str> = code.lines().collect();

    let (blank_lines, comment_lines, code_lines, import_count) = classify_lines(&lines);
    let functions = extract_functions(&lines);

    let max_complexity = functions
        .iter()
        .map(|f| f.cyclomatic_complexity)
        .max()
        .unwrap_or(0);
    let average_complexity = if functions.is_empty() {
        0.0
    } else {
        let total: u32 = functions.iter().map(|f| f.cyclomatic_complexity).sum();
        round1(f64::from(total) / functions.len() as f64)
    };

    FileMetrics {
        file_path: file_path.to_string(),
        total_lines: lines.len(),
        blank_lines,
        comment_lines,
        code_lines,
        import_count,
        functions,
        average_complexity,
        max_complexity,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Single pass: (blank, comment, code, imports). Block comments are a
/// two-state machine; a line inside one is a comment no matter what it
/// holds, including nothing.
fn classify_lines(lines: &[&str]) -> (usize, usize, usize, usize) {
    let mut blank = 0;
    let mut comment = 0;
    let mut code = 0;
    let mut imports = 0;
    let mut in_block_comment = false;

    for line in lines {
        let trimmed = line.trim();

        if in_block_comment {
            comment += 1;
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }

        if trimmed.starts_with("import ") || trimmed.starts_with("require(") {
            imports += 1;
        }

        if trimmed.is_empty() {
            blank += 1;
        } else if trimmed.starts_with("//") {
            comment += 1;
        } else if trimmed.starts_with("/*") {
            comment += 1;
            if !trimmed.contains("*/") {
                in_block_comment = true;
            }
        } else {
            code += 1;
        }
    }

    (blank, comment, code, imports)
}

fn extract_functions(lines: &[&str]) -> Vec<FunctionMetric> {
    let mut functions = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(name) = match_declaration(line.trim()) else {
            continue;
        };

        let start_line = idx + 1;
        let end_line = function_end_line(lines, idx);
        let span = lines[idx..end_line].join("\n");

        functions.push(FunctionMetric {
            name,
            start_line,
            end_line,
            line_count: end_line - start_line + 1,
            cyclomatic_complexity: cyclomatic_complexity(&span),
        });
    }

    functions
}

fn match_declaration(trimmed: &str) -> Option<String> {
    if let Some(caps) = FN_DECLARATION.captures(trimmed) {
        return Some(
            caps.get(1)
                .map_or_else(|| "anonymous".to_string(), |m| m.as_str().to_string()),
        );
    }
    if let Some(caps) = FN_CONST_ARROW.captures(trimmed) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    if let Some(caps) = FN_PROPERTY_ARROW.captures(trimmed) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    if let Some(caps) = FN_METHOD_SHORTHAND.captures(trimmed) {
        let name = caps.get(1).map(|m| m.as_str())?;
        if !NOT_METHOD_NAMES.contains(&name) {
            return Some(name.to_string());
        }
    }
    None
}

/// Scans forward counting braces until the running count returns to zero
/// after having gone positive. Braces inside strings count too; a function
/// that never opens a brace runs to whatever closes one later, or EOF.
/// Returns a 1-based line number.
fn function_end_line(lines: &[&str], start_idx: usize) -> usize {
    let mut depth: i64 = 0;
    let mut opened = false;

    for (offset, line) in lines[start_idx..].iter().enumerate() {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => depth -= 1,
                _ => {}
            }
            if opened && depth == 0 {
                return start_idx + offset + 1;
            }
        }
    }

    lines.len()
}

/// Base path of 1, plus one per decision-point match. Counts are plain
/// regex hits over the function's text span, so decision keywords inside
/// strings or comments are counted as well.
fn cyclomatic_complexity(span: &str) -> u32 {
    let mut complexity = 1u32;
    for pattern in DECISION_PATTERNS.iter() {
        complexity += u32::try_from(pattern.find_iter(span).count()).unwrap_or(u32::MAX);
    }
    complexity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_comment_blank_and_if() {
        let metrics = calculate("// comment\n\nfunction f() { if (x) { return 1; } }", "f.js");

        assert_eq!(metrics.comment_lines, 1);
        assert_eq!(metrics.blank_lines, 1);
        assert_eq!(metrics.code_lines, 1);
        assert_eq!(metrics.functions.len(), 1);

        let f = &metrics.functions[0];
        assert_eq!(f.name, "f");
        assert_eq!(f.start_line, 3);
        assert_eq!(f.end_line, 3);
        assert_eq!(f.cyclomatic_complexity, 2);
    }

    #[test]
    fn line_totals_are_additive() {
        let samples = [
            "",
            "const x = 1;",
            "// only a comment",
            "/* block\n\n   still block\n*/\ncode();",
            "a\n\n\nb\n// c\n/* d */ e",
        ];
        for code in samples {
            let m = calculate(code, "sample.js");
            assert_eq!(
                m.total_lines,
                m.code_lines + m.blank_lines + m.comment_lines,
                "additivity failed for {code:?}"
            );
        }
    }

    #[test]
    fn blank_line_inside_block_comment_counts_as_comment() {
        let m = calculate("/*\n\n*/", "f.js");
        assert_eq!(m.comment_lines, 3);
        assert_eq!(m.blank_lines, 0);
    }

    #[test]
    fn block_comment_closing_on_open_line_does_not_enter_state() {
        let m = calculate("/* one-liner */\ncode();", "f.js");
        assert_eq!(m.comment_lines, 1);
        assert_eq!(m.code_lines, 1);
    }

    #[test]
    fn import_counting() {
        let code = "import { a } from 'a';\nimport b from 'b';\nrequire('c');\nconst d = 1;";
        let m = calculate(code, "f.js");
        assert_eq!(m.import_count, 3);
    }

    #[test]
    fn all_four_declaration_shapes_match() {
        let code = "\
function named() {\n}\n\
const arrowed = (x) => {\n};\n\
handler: (event) => {\n},\n\
render() {\n}";
        let m = calculate(code, "f.js");
        let names: Vec<&str> = m.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["named", "arrowed", "handler", "render"]);
    }

    #[test]
    fn unnamed_function_is_anonymous() {
        let m = calculate("export default function (x) {\n  return x;\n}", "f.js");
        assert_eq!(m.functions.len(), 1);
        assert_eq!(m.functions[0].name, "anonymous");
        assert_eq!(m.functions[0].end_line, 3);
    }

    #[test]
    fn control_flow_lines_are_not_methods() {
        let code = "function f() {\n  if (x) {\n  }\n  while (y) {\n  }\n}";
        let m = calculate(code, "f.js");
        assert_eq!(m.functions.len(), 1);
    }

    #[test]
    fn complexity_floor_is_one() {
        let m = calculate("function plain() {\n  return 42;\n}", "f.js");
        assert_eq!(m.functions[0].cyclomatic_complexity, 1);
    }

    #[test]
    fn ternary_and_nullish_both_count() {
        // `a ?? b` trips both the ternary pattern (`?` not followed by `:`)
        // and the nullish pattern; that double count is pinned behavior.
        let m = calculate("const f = (a, b) => a ?? b;", "f.js");
        assert_eq!(m.functions[0].cyclomatic_complexity, 3);

        let t = calculate("function g(a) { return a ? 1 : 2; }", "f.js");
        assert_eq!(t.functions[0].cyclomatic_complexity, 2);
    }

    #[test]
    fn logical_operators_count() {
        let m = calculate("function f(a, b, c) { return a && b || c; }", "f.js");
        assert_eq!(m.functions[0].cyclomatic_complexity, 3);
    }

    #[test]
    fn brace_inside_string_still_counts() {
        // Known misfire: the closing brace in the string literal balances
        // the scan early.
        let code = "function f() {\n  const s = \"}\";\n  return s;\n}";
        let m = calculate(code, "f.js");
        assert_eq!(m.functions[0].end_line, 2);
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let code = "function a() {\n  return 1;\n}\nfunction b(x) {\n  if (x) { return 2; }\n  return 3;\n}";
        let m = calculate(code, "f.js");
        assert_eq!(m.functions.len(), 2);
        assert!((m.average_complexity - 1.5).abs() < f64::EPSILON);
        assert_eq!(m.max_complexity, 2);
    }

    #[test]
    fn no_functions_yields_zero_aggregates() {
        let m = calculate("const x = 1;\nconst y = 2;", "f.js");
        assert!(m.functions.is_empty());
        assert!((m.average_complexity - 0.0).abs() < f64::EPSILON);
        assert_eq!(m.max_complexity, 0);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let m = calculate("", "empty.js");
        assert_eq!(m.total_lines, 0);
        assert_eq!(m.code_lines, 0);
        assert_eq!(m.import_count, 0);
        assert!(m.functions.is_empty());
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(ComplexityRating::of(1), ComplexityRating::Low);
        assert_eq!(ComplexityRating::of(5), ComplexityRating::Low);
        assert_eq!(ComplexityRating::of(6), ComplexityRating::Medium);
        assert_eq!(ComplexityRating::of(10), ComplexityRating::Medium);
        assert_eq!(ComplexityRating::of(11), ComplexityRating::High);
        assert_eq!(ComplexityRating::of(20), ComplexityRating::High);
        assert_eq!(ComplexityRating::of(21), ComplexityRating::VeryHigh);
    }
}
