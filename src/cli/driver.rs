use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::args::{
    CliArgs, Command, CompleteArgs, CursorArgs, InputArgs, OutputFormat, ParseArgs, TypeArgs,
};
use crate::cli::config::{CaretConfig, language_for};
use crate::cli::reporter::Reporter;
use crate::document::Document;
use caret_checker::InferenceOptions;
use caret_common::position::Position;
use caret_lsp::{Language, RecencyTracker};
use caret_scanner::{LineState, highlight_line, tokenize};

/// A source file read for one command.
#[derive(Debug, Clone)]
pub struct Input {
    pub path: PathBuf,
    pub source: String,
    pub language: Language,
}

/// Read the input file, or stdin for `-`.
pub fn read_input(args: &InputArgs, config: &CaretConfig) -> Result<Input> {
    let source = if args.file.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        source
    } else {
        std::fs::read_to_string(&args.file)
            .with_context(|| format!("failed to read {}", args.file.display()))?
    };
    Ok(Input {
        language: language_for(&args.file, args.language, config),
        path: args.file.clone(),
        source,
    })
}

/// Run the selected subcommand and return what to print.
pub fn run(args: &CliArgs, config: &CaretConfig, reporter: &Reporter) -> Result<String> {
    let format = args.format;
    match &args.command {
        Command::Tokens(input) => {
            let input = read_script(input, config, "tokens")?;
            let tokens = tokenize(&input.source);
            render(format, &tokens, || reporter.render_tokens(&tokens))
        }
        Command::Highlight(input) => {
            let input = read_script(input, config, "highlight")?;
            let lines = highlight_lines(&input.source);
            render(format, &lines, || reporter.render_highlight(&lines))
        }
        Command::Parse(parse) => run_parse(parse, config, format),
        Command::Scopes(input) => {
            let input = read_script(input, config, "scopes")?;
            let document = Document::new(input.source, input.language);
            render(format, document.scopes(), || {
                reporter.render_scopes(document.scopes())
            })
        }
        Command::Type(type_args) => run_type(type_args, config, format, reporter),
        Command::Complete(complete) => run_complete(complete, config, format, reporter),
    }
}

fn read_script(args: &InputArgs, config: &CaretConfig, command: &str) -> Result<Input> {
    let input = read_input(args, config)?;
    if !input.language.is_script() {
        bail!(
            "`{command}` works on JavaScript or TypeScript, {} is {}",
            input.path.display(),
            input.language
        );
    }
    Ok(input)
}

/// Highlight every line, carrying block comment and template state across
/// line breaks.
pub fn highlight_lines(source: &str) -> Vec<Vec<caret_scanner::HighlightToken>> {
    let mut state = LineState::default();
    source
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let (tokens, next) = highlight_line(line, state);
            state = next;
            tokens
        })
        .collect()
}

fn run_parse(args: &ParseArgs, config: &CaretConfig, format: OutputFormat) -> Result<String> {
    let input = read_script(&args.input, config, "parse")?;
    let node = if args.expression {
        caret_parser::parse_expression(&input.source)
    } else {
        caret_parser::parse_program(&input.source)
    }
    .with_context(|| format!("failed to parse {}", input.path.display()))?;
    render(format, &node, || format!("{node:#?}\n"))
}

fn run_type(
    args: &TypeArgs,
    config: &CaretConfig,
    format: OutputFormat,
    reporter: &Reporter,
) -> Result<String> {
    let input = read_script(&args.input, config, "type")?;
    let document = Document::new(input.source, input.language);
    let offset = cursor_offset(&document, &args.cursor)?;
    let options = InferenceOptions {
        best_guess: config.completion.best_guess_types && !args.no_best_guess,
    };
    let inference = document.inference(options);
    let ty = inference.get_type_at_offset(&args.expression, offset);
    let members = args.members.then(|| inference.get_members_of_type(&ty));
    debug!("type of '{}' at {}: {}", args.expression, offset, ty);

    #[derive(Serialize)]
    struct TypeReport<'a> {
        expression: &'a str,
        offset: u32,
        display: String,
        #[serde(rename = "type")]
        type_info: &'a caret_solver::TypeDescriptor,
        #[serde(skip_serializing_if = "Option::is_none")]
        members: Option<&'a [caret_checker::MemberInfo]>,
    }
    let report = TypeReport {
        expression: &args.expression,
        offset,
        display: ty.to_string(),
        type_info: &ty,
        members: members.as_deref(),
    };
    render(format, &report, || {
        reporter.render_type(&ty, members.as_deref())
    })
}

fn run_complete(
    args: &CompleteArgs,
    config: &CaretConfig,
    format: OutputFormat,
    reporter: &Reporter,
) -> Result<String> {
    let input = read_input(&args.input, config)?;
    let mut options = config.completion.clone();
    args.apply_overrides(&mut options);

    let mut recency = RecencyTracker::new(options.recency_capacity);
    for label in args.recent.iter().rev() {
        recency.record(label);
    }

    let document = Document::new(input.source, input.language);
    let offset = cursor_offset(&document, &args.cursor)?;
    let result = document.completions(offset, &options, Some(&recency));
    render(format, &result, || reporter.render_completions(&result))
}

/// Offset named by the cursor flags; the end of the document when none are
/// given.
pub fn cursor_offset(document: &Document, cursor: &CursorArgs) -> Result<u32> {
    if let Some(offset) = cursor.offset {
        if offset > document.len() {
            bail!(
                "offset {offset} is past the end of the document ({} UTF-16 units)",
                document.len()
            );
        }
        return Ok(offset);
    }
    match (cursor.line, cursor.column) {
        (Some(line), Some(column)) => document
            .offset_at(Position::new(line, column))
            .with_context(|| format!("line {line} is past the end of the document")),
        _ => Ok(document.len()),
    }
}

fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(text()),
    }
}
