use clap::Parser;
use std::path::PathBuf;

use super::args::CliArgs;
use super::config::CaretConfig;
use super::driver::{highlight_lines, run};
use super::reporter::Reporter;
use caret_scanner::TokenCategory;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Workspace {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }
}

fn run_cli(args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["caret"];
    argv.extend_from_slice(args);
    let args = CliArgs::try_parse_from(argv).expect("args should parse");
    run(&args, &CaretConfig::default(), &Reporter::new(false))
}

#[test]
fn completes_members_as_json() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "const s = \"hi\";\ns.tri");
    let out = run_cli(&["complete", path.to_str().unwrap(), "--format", "json"]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["isMemberCompletion"], true);
    assert_eq!(json["entries"][0]["label"], "trim");
}

#[test]
fn completes_at_line_and_column() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "const count = 1;\ncou\n");
    let out = run_cli(&[
        "complete",
        path.to_str().unwrap(),
        "--line",
        "1",
        "--column",
        "3",
    ])
    .unwrap();
    assert!(out.starts_with("javascript global completion, prefix 'cou', 1 entries"));
    assert!(out.contains("variable   count: number"));
}

#[test]
fn recent_labels_rank_first() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "const s = \"hi\";\ns.");
    let out = run_cli(&[
        "complete",
        path.to_str().unwrap(),
        "--recent",
        "trim,slice",
        "--format",
        "json",
    ])
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["entries"][0]["label"], "trim");
    assert_eq!(json["entries"][1]["label"], "slice");
}

#[test]
fn language_comes_from_extension() {
    let ws = Workspace::new();
    let path = ws.file("style.css", ".btn { col");
    let out = run_cli(&["complete", path.to_str().unwrap(), "--format", "json"]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["language"], "css");
    assert_eq!(json["entries"][0]["label"], "color");
}

#[test]
fn offset_past_end_is_an_error() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "x");
    let err = run_cli(&["complete", path.to_str().unwrap(), "--offset", "9"]).unwrap_err();
    assert!(err.to_string().contains("past the end"));
}

#[test]
fn type_command_reports_members() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "const user = { name: \"Ada\", age: 36 };\n");
    let out = run_cli(&[
        "type",
        path.to_str().unwrap(),
        "--expr",
        "user",
        "--members",
        "--format",
        "json",
    ])
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["display"], "{ name: string, age: number }");
    assert_eq!(json["type"]["kind"], "object");
    assert_eq!(json["members"][0]["label"], "age");
}

#[test]
fn script_commands_reject_markup() {
    let ws = Workspace::new();
    let path = ws.file("page.html", "<div>");
    let err = run_cli(&["scopes", path.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("works on JavaScript or TypeScript"));
}

#[test]
fn parse_errors_carry_the_file_name() {
    let ws = Workspace::new();
    let path = ws.file("broken.js", "let = ;");
    let err = run_cli(&["parse", path.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("broken.js"));
}

#[test]
fn tokens_text_output() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "let a");
    let out = run_cli(&["tokens", path.to_str().unwrap()]).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].trim_start().starts_with("0..3"));
    assert!(lines[0].ends_with(" let"));
}

#[test]
fn scopes_text_output() {
    let ws = Workspace::new();
    let path = ws.file("app.js", "function greet(name) { return name; }\n");
    let out = run_cli(&["scopes", path.to_str().unwrap()]).unwrap();
    assert!(out.starts_with("Global [0,"));
    assert!(out.contains("greet Function"));
    assert!(out.contains("  Function ["));
    assert!(out.contains("name Parameter"));
}

#[test]
fn highlight_carries_block_comments_across_lines() {
    let lines = highlight_lines("/* start\nstill */ let x\r\n");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0][0].category, TokenCategory::Trivia);
    assert_eq!(lines[1][0].category, TokenCategory::Trivia);
    assert_eq!(lines[1][0].end, 8);
    assert!(lines[2].is_empty());
}
