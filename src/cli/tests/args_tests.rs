use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, ColorChoice, Command, OutputFormat};
use caret_lsp::{CompletionOptions, Language};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["caret", "tokens", "app.js"]).expect("args should parse");

    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.color, ColorChoice::Auto);
    assert!(args.config.is_none());
    let Command::Tokens(input) = args.command else {
        panic!("expected tokens command");
    };
    assert_eq!(input.file, PathBuf::from("app.js"));
    assert_eq!(input.language, None);
}

#[test]
fn parses_complete_flags() {
    let args = CliArgs::try_parse_from([
        "caret",
        "complete",
        "page.html",
        "--language",
        "ts",
        "--line",
        "3",
        "--column",
        "7",
        "--max-results",
        "5",
        "--no-keywords",
        "--recent",
        "map,filter",
        "--format",
        "json",
    ])
    .expect("complete args should parse");

    assert_eq!(args.format, OutputFormat::Json);
    let Command::Complete(complete) = args.command else {
        panic!("expected complete command");
    };
    assert_eq!(complete.input.language, Some(Language::TypeScript));
    assert_eq!(complete.cursor.line, Some(3));
    assert_eq!(complete.cursor.column, Some(7));
    assert_eq!(complete.recent, vec!["map", "filter"]);

    let mut options = CompletionOptions::default();
    complete.apply_overrides(&mut options);
    assert_eq!(options.max_results, 5);
    assert!(!options.include_keywords);
    assert!(options.include_globals);
    assert!(options.best_guess_types);
}

#[test]
fn rejects_line_without_column() {
    assert!(CliArgs::try_parse_from(["caret", "complete", "a.js", "--line", "1"]).is_err());
}

#[test]
fn rejects_line_with_offset() {
    assert!(
        CliArgs::try_parse_from([
            "caret", "complete", "a.js", "--line", "1", "--column", "0", "--offset", "3"
        ])
        .is_err()
    );
}

#[test]
fn rejects_unknown_language() {
    assert!(CliArgs::try_parse_from(["caret", "tokens", "a.js", "--language", "cobol"]).is_err());
}

#[test]
fn parses_type_command() {
    let args = CliArgs::try_parse_from([
        "caret", "type", "a.js", "--expr", "user.name", "--offset", "10", "--members",
    ])
    .expect("type args should parse");
    let Command::Type(type_args) = args.command else {
        panic!("expected type command");
    };
    assert_eq!(type_args.expression, "user.name");
    assert_eq!(type_args.cursor.offset, Some(10));
    assert!(type_args.members);
    assert!(!type_args.no_best_guess);
}
