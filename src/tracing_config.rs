//! Tracing configuration for the `caret` binary.
//!
//! Supports three output formats controlled by `CARET_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, one level per
//!   span (`bind_source`, `completions`, ...)
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why did `user.` offer nothing?
//! CARET_LOG=debug CARET_LOG_FORMAT=tree caret complete app.js --line 3 --column 5
//!
//! # JSON (for tooling)
//! CARET_LOG=debug CARET_LOG_FORMAT=json caret type app.js --expr user.name
//!
//! # Fine-grained filtering
//! CARET_LOG="caret_checker=trace,caret_binder=debug" caret scopes app.js
//! ```
//!
//! The subscriber is only initialised when `CARET_LOG` (or `RUST_LOG`) is
//! set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `CARET_LOG_FORMAT` value; anything unrecognized is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// What `init_tracing` installs, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    /// Filter directives in `RUST_LOG` syntax
    pub directives: String,
    pub format: LogFormat,
}

impl TracingSettings {
    /// Settings from a variable lookup. `CARET_LOG` wins over `RUST_LOG`;
    /// `None` when neither is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = lookup("CARET_LOG").or_else(|| lookup("RUST_LOG"))?;
        let format = lookup("CARET_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or(LogFormat::Text);
        Some(TracingSettings { directives, format })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `CARET_LOG` nor `RUST_LOG` is set, or when a
/// subscriber is already installed. All output goes to stderr so it never
/// mixes with command output on stdout.
pub fn init_tracing() {
    let Some(settings) = TracingSettings::from_env() else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(&settings.directives);

    let installed = match settings.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_bracketed_fields(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer()
                .with_target(true)
                .without_time()
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_settings_need_a_log_variable() {
        assert_eq!(TracingSettings::from_lookup(lookup(&[])), None);
        assert_eq!(
            TracingSettings::from_lookup(lookup(&[("CARET_LOG_FORMAT", "tree")])),
            None
        );
    }

    #[test]
    fn test_caret_log_wins_over_rust_log() {
        let settings = TracingSettings::from_lookup(lookup(&[
            ("RUST_LOG", "info"),
            ("CARET_LOG", "caret_checker=trace"),
            ("CARET_LOG_FORMAT", "json"),
        ]));
        assert_eq!(
            settings,
            Some(TracingSettings {
                directives: "caret_checker=trace".to_string(),
                format: LogFormat::Json,
            })
        );

        let settings = TracingSettings::from_lookup(lookup(&[("RUST_LOG", "debug")]));
        assert_eq!(
            settings,
            Some(TracingSettings {
                directives: "debug".to_string(),
                format: LogFormat::Text,
            })
        );
    }
}
