//! Integration test: `linemark metrics --json` emits the full metrics
//! breakdown for each input file.

use std::process::Command;
use tempfile::TempDir;

const SAMPLE: &str = "// comment\n\nimport { x } from 'x';\nfunction f() { if (x) { return 1; } }\n";

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("sample.js"), SAMPLE).expect("write sample.js");
    dir
}

fn run_metrics(dir: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_linemark"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("failed to execute linemark")
}

#[test]
fn json_metrics_carry_line_breakdown_and_functions() {
    let dir = workspace();
    let output = run_metrics(&dir, &["metrics", "sample.js", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    let files = value.as_array().expect("JSON root must be an array");
    assert_eq!(files.len(), 1);

    let m = &files[0];
    assert_eq!(m["file_path"], "sample.js");
    assert_eq!(m["total_lines"], 4);
    assert_eq!(m["comment_lines"], 1);
    assert_eq!(m["blank_lines"], 1);
    assert_eq!(m["code_lines"], 2);
    assert_eq!(m["import_count"], 1);

    let functions = m["functions"].as_array().expect("functions array");
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0]["name"], "f");
    assert_eq!(functions[0]["cyclomatic_complexity"], 2);
}

#[test]
fn multiple_files_produce_one_entry_each() {
    let dir = workspace();
    std::fs::write(dir.path().join("empty.js"), "").expect("write empty.js");

    let output = run_metrics(&dir, &["metrics", "sample.js", "empty.js", "--json"]);
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    let files = value.as_array().expect("array");

    assert_eq!(files.len(), 2);
    assert_eq!(files[1]["total_lines"], 0);
}

#[test]
fn unreadable_file_fails_with_context() {
    let dir = workspace();
    let output = run_metrics(&dir, &["metrics", "ghost.js"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ghost.js"));
}
