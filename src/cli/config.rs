use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use caret_lsp::{CompletionOptions, Language};

/// Config file looked up in the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "caret.json5";

/// Contents of a caret config file. Every field is optional.
///
/// ```json5
/// {
///   // used when the file extension says nothing
///   defaultLanguage: "typescript",
///   completion: { maxResults: 50, caseSensitive: true },
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CaretConfig {
    pub default_language: Option<Language>,
    pub completion: CompletionOptions,
}

/// Parse config text. JSON5 allows comments, unquoted keys and trailing
/// commas.
pub fn parse_config(source: &str) -> Result<CaretConfig> {
    json5::from_str(source).context("failed to parse caret config")
}

pub fn load_config(path: &Path) -> Result<CaretConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config: {}", path.display()))
}

/// The explicit config path, else `caret.json5` in `cwd` if it exists, else
/// the defaults. An explicit path that cannot be read is an error.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<CaretConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate: PathBuf = cwd.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        return load_config(&candidate);
    }
    Ok(CaretConfig::default())
}

/// Language for `path`: the explicit choice, else the file extension, else
/// the configured default, else JavaScript.
pub fn language_for(path: &Path, explicit: Option<Language>, config: &CaretConfig) -> Language {
    explicit
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(Language::from_id)
        })
        .or(config.default_language)
        .unwrap_or(Language::JavaScript)
}
