//! Line-based diff via longest common subsequence.
//!
//! The table is O(m*n) in time and space, which is fine for editor-sized
//! buffers but not for multi-megabyte inputs.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

/// One output line of a diff. Line numbers are 1-based; `old_line` is set
/// for unchanged and removed lines, `new_line` for unchanged and added ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<usize>,
}

/// Computes a classified line diff between two text blobs.
///
/// Every input line appears exactly once in the output: the unchanged and
/// removed lines concatenate back to `original`, the unchanged and added
/// lines back to `current`. When lines repeat, which of several equally
/// minimal diffs comes out is implementation-defined.
#[must_use]
pub fn diff(original: &str, current: &str) -> Vec<DiffLine> {
    let a: Vec<&str> = original.lines().collect();
    let b: Vec<&str> = current.lines().collect();
    let lcs = longest_common_subsequence(&a, &b);

    let mut out = Vec::with_capacity(a.len().max(b.len()));
    let (mut ai, mut bj, mut k) = (0, 0, 0);

    while ai < a.len() || bj < b.len() {
        let anchor = lcs.get(k).copied();
        if ai < a.len() && Some(a[ai]) != anchor {
            out.push(DiffLine {
                kind: DiffKind::Removed,
                text: a[ai].to_string(),
                old_line: Some(ai + 1),
                new_line: None,
            });
            ai += 1;
        } else if bj < b.len() && Some(b[bj]) != anchor {
            out.push(DiffLine {
                kind: DiffKind::Added,
                text: b[bj].to_string(),
                old_line: None,
                new_line: Some(bj + 1),
            });
            bj += 1;
        } else {
            // Both sides sit on the next common line.
            out.push(DiffLine {
                kind: DiffKind::Unchanged,
                text: a[ai].to_string(),
                old_line: Some(ai + 1),
                new_line: Some(bj + 1),
            });
            ai += 1;
            bj += 1;
            k += 1;
        }
    }

    out
}

/// Standard DP-table LCS over lines. The backtrack prefers stepping up the
/// table (dropping a line of `a`) on strict inequality, so ambiguous runs
/// come out removal-first.
fn longest_common_subsequence<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<&'a str> {
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut lcs = Vec::with_capacity(dp[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            lcs.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    lcs.reverse();
    lcs
}

/// One row of a side-by-side rendering. Added and removed lines leave a
/// blank placeholder cell on the opposite side.
#[derive(Debug, Clone, Serialize)]
pub struct SplitRow {
    pub left: Option<DiffLine>,
    pub right: Option<DiffLine>,
}

/// Splits a diff into left/right columns for side-by-side display.
#[must_use]
pub fn split_rows(lines: &[DiffLine]) -> Vec<SplitRow> {
    lines
        .iter()
        .map(|line| match line.kind {
            DiffKind::Unchanged => SplitRow {
                left: Some(line.clone()),
                right: Some(line.clone()),
            },
            DiffKind::Removed => SplitRow {
                left: Some(line.clone()),
                right: None,
            },
            DiffKind::Added => SplitRow {
                left: None,
                right: Some(line.clone()),
            },
        })
        .collect()
}

/// Renders a diff as a single column with `+`/`-`/space prefixes.
#[must_use]
pub fn inline(lines: &[DiffLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let prefix = match line.kind {
            DiffKind::Unchanged => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
        };
        out.push(prefix);
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}
