use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use caret_lsp::{CompletionOptions, Language};

/// CLI arguments for the caret binary.
#[derive(Parser, Debug)]
#[command(
    name = "caret",
    version,
    about = "Code completion engine for JavaScript, TypeScript, HTML and CSS"
)]
pub struct CliArgs {
    /// Path to a JSON5 config file. Defaults to `caret.json5` in the current
    /// directory when present.
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Colorize text output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream of a script.
    Tokens(InputArgs),
    /// Print per-line highlighting categories.
    Highlight(InputArgs),
    /// Parse a script (or a single expression) and print its AST.
    Parse(ParseArgs),
    /// Print the scope tree of a script.
    Scopes(InputArgs),
    /// Infer the type of an access chain at a position.
    Type(TypeArgs),
    /// Complete at a position.
    Complete(CompleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Source file, or `-` for stdin.
    pub file: PathBuf,

    /// Language of the input. Inferred from the file extension when omitted.
    #[arg(short = 'l', long)]
    pub language: Option<Language>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Parse the input as a single expression.
    #[arg(long)]
    pub expression: bool,
}

/// A cursor given as line/column (0-based, UTF-16 columns) or as an offset.
/// Neither means the end of the document.
#[derive(Args, Debug, Clone, Default)]
pub struct CursorArgs {
    #[arg(long, requires = "column", conflicts_with = "offset")]
    pub line: Option<u32>,

    #[arg(long, requires = "line")]
    pub column: Option<u32>,

    /// UTF-16 offset into the document.
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct TypeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub cursor: CursorArgs,

    /// The access chain to type, e.g. `user.profile.name`.
    #[arg(short = 'e', long = "expr")]
    pub expression: String,

    /// List the members of the inferred type too.
    #[arg(long)]
    pub members: bool,

    /// Do not guess types from names when inference gives up.
    #[arg(long = "no-best-guess")]
    pub no_best_guess: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompleteArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub cursor: CursorArgs,

    /// Maximum entries returned; 0 means no limit.
    #[arg(long = "max-results")]
    pub max_results: Option<usize>,

    #[arg(long = "case-sensitive")]
    pub case_sensitive: bool,

    #[arg(long = "no-camel-case")]
    pub no_camel_case: bool,

    #[arg(long = "no-keywords")]
    pub no_keywords: bool,

    #[arg(long = "no-globals")]
    pub no_globals: bool,

    #[arg(long = "no-best-guess")]
    pub no_best_guess: bool,

    /// Recently accepted labels, most recent first.
    #[arg(long = "recent", value_delimiter = ',')]
    pub recent: Vec<String>,
}

impl CompleteArgs {
    /// Apply the flags given on the command line over `options`.
    pub fn apply_overrides(&self, options: &mut CompletionOptions) {
        if let Some(max_results) = self.max_results {
            options.max_results = max_results;
        }
        if self.case_sensitive {
            options.case_sensitive = true;
        }
        if self.no_camel_case {
            options.camel_case_matching = false;
        }
        if self.no_keywords {
            options.include_keywords = false;
        }
        if self.no_globals {
            options.include_globals = false;
        }
        if self.no_best_guess {
            options.best_guess_types = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}
