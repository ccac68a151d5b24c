//! Command-line tests
//!
//! These drive the CLI the way the binary does: parse arguments, resolve
//! the config from a working directory, run, and inspect what would be
//! printed.

use caret::cli::args::CliArgs;
use caret::cli::config::{CaretConfig, DEFAULT_CONFIG_FILE, resolve_config};
use caret::cli::driver::run;
use caret::cli::reporter::Reporter;
use caret::{CompletionOptions, Document, Language};
use clap::Parser;
use std::path::{Path, PathBuf};

struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    fn new() -> Self {
        Project {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Run the CLI with this project as the working directory.
    fn caret(&self, args: &[&str]) -> anyhow::Result<String> {
        let mut argv = vec!["caret"];
        argv.extend_from_slice(args);
        let args = CliArgs::try_parse_from(argv)?;
        let config = resolve_config(args.config.as_deref(), self.root())?;
        run(&args, &config, &Reporter::new(false))
    }

    fn caret_json(&self, args: &[&str]) -> serde_json::Value {
        let mut args = args.to_vec();
        args.extend_from_slice(&["--format", "json"]);
        let out = self.caret(&args).expect("command should succeed");
        serde_json::from_str(&out).expect("output should be JSON")
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn test_config_default_language_applies_to_unknown_extensions() {
    let project = Project::new();
    project.write(
        DEFAULT_CONFIG_FILE,
        "{\n  // snippets are TypeScript\n  defaultLanguage: 'typescript',\n}\n",
    );
    let snippet = project.write("snippet.txt", "inter");

    let json = project.caret_json(&["complete", path_arg(&snippet)]);
    assert_eq!(json["language"], "typescript");
    assert_eq!(json["entries"][0]["label"], "interface");

    let script = project.write("snippet.js", "inter");
    let json = project.caret_json(&["complete", path_arg(&script)]);
    assert_eq!(json["language"], "javascript");
    assert_eq!(json["entries"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_command_line_flags_override_config() {
    let project = Project::new();
    project.write(DEFAULT_CONFIG_FILE, "{ completion: { maxResults: 2 } }");
    let file = project.write("empty.js", "\n");

    let json = project.caret_json(&["complete", path_arg(&file)]);
    assert_eq!(json["entries"].as_array().map(Vec::len), Some(2));

    let json = project.caret_json(&["complete", path_arg(&file), "--max-results", "5"]);
    assert_eq!(json["entries"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_explicit_config_flag_after_subcommand() {
    let project = Project::new();
    let config = project.write(
        "team.json5",
        "{ completion: { includeKeywords: false, includeGlobals: false, }, }",
    );
    let file = project.write("app.js", "let count = 0;\n");

    let json = project.caret_json(&["complete", path_arg(&file), "-c", path_arg(&config)]);
    let labels: Vec<&str> = json["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .filter_map(|e| e["label"].as_str())
        .collect();
    assert_eq!(labels, vec!["count"]);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let project = Project::new();
    let file = project.write("app.js", "x");
    let missing = project.root().join("nope.json5");

    let err = project
        .caret(&["complete", path_arg(&file), "--config", path_arg(&missing)])
        .unwrap_err();
    assert!(err.to_string().contains("nope.json5"), "{err:#}");
}

#[test]
fn test_invalid_config_is_an_error() {
    let project = Project::new();
    project.write(DEFAULT_CONFIG_FILE, "{ maxResults: 2 }");
    let file = project.write("app.js", "x");

    assert!(project.caret(&["complete", path_arg(&file)]).is_err());
}

#[test]
fn test_type_command_reports_object_shape() {
    let project = Project::new();
    let file = project.write(
        "user.js",
        "const user = { name: \"Alice\", age: 30 };\n",
    );

    let json = project.caret_json(&["type", path_arg(&file), "--expr", "user", "--members"]);
    assert_eq!(json["display"], "{ name: string, age: number }");
    assert_eq!(json["type"]["kind"], "object");
    assert_eq!(json["members"][0]["label"], "age");
    assert_eq!(json["members"][1]["label"], "name");
}

#[test]
fn test_type_command_without_best_guess() {
    let project = Project::new();
    let file = project.write("guess.js", "let userName;\n");

    let json = project.caret_json(&["type", path_arg(&file), "--expr", "userName"]);
    assert_eq!(json["display"], "string");

    let json = project.caret_json(&[
        "type",
        path_arg(&file),
        "--expr",
        "userName",
        "--no-best-guess",
    ]);
    assert_eq!(json["type"]["kind"], "unknown");
}

#[test]
fn test_cli_and_document_agree() {
    let project = Project::new();
    let source = "const list = [1, 2];\nlist.fi";
    let file = project.write("list.js", source);

    let json = project.caret_json(&["complete", path_arg(&file)]);
    let document = Document::new(source, Language::JavaScript);
    let result = document.completions(
        document.len(),
        &CompletionOptions::default(),
        None,
    );

    let from_cli: Vec<&str> = json["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .filter_map(|e| e["label"].as_str())
        .collect();
    let from_document: Vec<&str> = result.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(from_cli, from_document);
    assert!(from_cli.contains(&"filter"));
}

#[test]
fn test_default_config_when_file_is_absent() {
    let project = Project::new();
    let config = resolve_config(None, project.root()).unwrap();
    assert_eq!(config, CaretConfig::default());
}
