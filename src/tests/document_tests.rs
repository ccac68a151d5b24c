use super::*;
use caret_checker::InferenceOptions;

#[test]
fn test_script_document_is_bound_once() {
    let document = Document::new(
        "const user = { name: \"Ada\" };\nuser.",
        Language::JavaScript,
    );
    let ty = document.type_of("user", document.len(), InferenceOptions::default());
    assert_eq!(ty.to_string(), "{ name: string }");

    let first = document.completions(document.len(), &CompletionOptions::default(), None);
    let second = document.completions(document.len(), &CompletionOptions::default(), None);
    assert_eq!(first, second);
    assert_eq!(first.entries.len(), 1);
    assert_eq!(first.entries[0].label, "name");
}

#[test]
fn test_markup_document_has_no_scopes() {
    let document = Document::new("<di", Language::Html);
    assert_eq!(document.scopes().len(), 1);
    assert!(document.parse_errors().is_empty());
    let result = document.completions(document.len(), &CompletionOptions::default(), None);
    assert!(result.entries.iter().any(|e| e.label == "div"));
}

#[test]
fn test_recovered_parse_errors_are_kept() {
    let document = Document::new("let a = ;\nconst b = 1;\n", Language::JavaScript);
    assert!(!document.parse_errors().is_empty());
    assert!(document.scopes().resolve(caret_binder::ScopeTree::ROOT, "b").is_some());
}

#[test]
fn test_members_of() {
    let document = Document::new("const items = [1, 2];\n", Language::JavaScript);
    let members = document.members_of("items", document.len(), InferenceOptions::default());
    assert!(members.iter().any(|m| m.label == "push"));
    assert_eq!(
        document.offset_at(Position::new(1, 0)),
        Some(document.len())
    );
}
