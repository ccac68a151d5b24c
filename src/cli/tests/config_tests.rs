use super::config::{
    CaretConfig, DEFAULT_CONFIG_FILE, language_for, load_config, parse_config, resolve_config,
};
use caret_lsp::{CompletionOptions, Language};
use std::path::Path;

#[test]
fn parses_json5_with_comments_and_trailing_commas() {
    let input = r#"
    {
      // prefer TypeScript keywords for unknown extensions
      defaultLanguage: "typescript",
      completion: {
        maxResults: 20,
        caseSensitive: true, /* inline */
      },
    }
    "#;

    let config = parse_config(input).expect("should parse JSON5");
    assert_eq!(config.default_language, Some(Language::TypeScript));
    assert_eq!(config.completion.max_results, 20);
    assert!(config.completion.case_sensitive);
    // Unset fields keep their defaults.
    assert!(config.completion.include_keywords);
    assert_eq!(
        config.completion.recency_capacity,
        CompletionOptions::default().recency_capacity
    );
}

#[test]
fn empty_object_is_the_default_config() {
    assert_eq!(parse_config("{}").expect("empty config"), CaretConfig::default());
}

#[test]
fn rejects_unknown_top_level_fields() {
    assert!(parse_config("{ completions: {} }").is_err());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.json5");
    let err = load_config(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config"));
    assert!(resolve_config(Some(&missing), dir.path()).is_err());
}

#[test]
fn resolves_default_config_file_in_cwd() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert_eq!(
        resolve_config(None, dir.path()).expect("defaults"),
        CaretConfig::default()
    );

    std::fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "{ completion: { maxResults: 7 } }",
    )
    .expect("write config");
    let config = resolve_config(None, dir.path()).expect("config from cwd");
    assert_eq!(config.completion.max_results, 7);
}

#[test]
fn language_resolution_order() {
    let config = CaretConfig {
        default_language: Some(Language::Css),
        ..CaretConfig::default()
    };
    assert_eq!(
        language_for(Path::new("a.tsx"), None, &config),
        Language::TypeScript
    );
    assert_eq!(
        language_for(Path::new("a.tsx"), Some(Language::Html), &config),
        Language::Html
    );
    assert_eq!(language_for(Path::new("notes"), None, &config), Language::Css);
    assert_eq!(
        language_for(Path::new("-"), None, &CaretConfig::default()),
        Language::JavaScript
    );
}
