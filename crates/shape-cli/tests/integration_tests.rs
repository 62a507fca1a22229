//! Integration tests for the shape CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn shape(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shape").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
    dir
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("shape").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Shape"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("shape").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_clean_directory() {
    let dir = workspace(&[
        ("main.js", "var a = console; a.log(1);"),
        ("lib/util.mjs", "var b = 2; b;"),
        ("README.md", "not a script"),
    ]);

    shape(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 file(s) checked, no errors"));
}

#[test]
fn test_check_reports_unsupported_construct() {
    let dir = workspace(&[("bad.js", "var x = 1; x.y;")]);

    shape(&dir)
        .args(["check", "bad.js"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "only objects support property access (found number)",
        ))
        .stderr(predicate::str::contains("1 error(s) found in 1 file(s)"));
}

#[test]
fn test_check_plain_format() {
    let dir = workspace(&[("decl.js", "let x = 1;")]);

    shape(&dir)
        .args(["check", "decl.js", "--format", "plain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "[decl.js] ERROR: block-scoped `let` declarations are not supported (shape)",
        ))
        .stderr(predicate::str::contains("at Span(0-"))
        .stderr(predicate::str::contains(
            "suggestion: declare the binding with `var`",
        ));
}

#[test]
fn test_check_pretty_format_shows_help() {
    let dir = workspace(&[("decl.js", "const x = 1;")]);

    shape(&dir)
        .args(["check", "decl.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "block-scoped `const` declarations are not supported",
        ))
        .stderr(predicate::str::contains("declare the binding with `var`"));
}

#[test]
fn test_check_json_format() {
    let dir = workspace(&[("main.js", "console.log(1); nope;")]);

    let output = shape(&dir)
        .args(["check", "main.js", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let file = &report["files"][0];
    assert_eq!(file["path"], "main.js");
    assert_eq!(file["diagnostics"].as_array().unwrap().len(), 0);
    assert_eq!(file["sideEffects"][0]["callee"], "console.log");
    assert_eq!(file["sideEffects"][0]["span"]["start"], 0);
    assert!(!file["uncaught"].is_null());
}

#[test]
fn test_check_syntax_error() {
    let dir = workspace(&[("broken.js", "var = ;")]);

    shape(&dir)
        .args(["check", "broken.js", "--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"level\": \"error\""));
}

#[test]
fn test_check_side_effects_flag() {
    let dir = workspace(&[("main.js", "console.log(1);")]);

    shape(&dir)
        .args(["check", "main.js", "--side-effects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("console.log(number(1)) at Span(0-14)"));
}

#[test]
fn test_config_file_selects_format() {
    let dir = workspace(&[
        ("main.js", "var a = 1;"),
        ("shape.toml", "[check]\nformat = \"json\"\n"),
    ]);

    shape(&dir)
        .args(["check", "main.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"files\""));
}

#[test]
fn test_check_missing_path() {
    let dir = TempDir::new().unwrap();

    shape(&dir)
        .args(["check", "missing.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn test_eval_expression() {
    let dir = TempDir::new().unwrap();

    shape(&dir)
        .args(["eval", "--expr", "console.log(1)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("console.log(number(1))"))
        .stdout(predicate::str::contains("Result: undefined"));
}

#[test]
fn test_eval_requires_input() {
    let dir = TempDir::new().unwrap();

    shape(&dir)
        .arg("eval")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Either --expr or --file"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();

    shape(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shape"));
}
