use crate::ast::{Node, NodeKind};
use crate::parser::parse_document;

fn statements(program: &Node) -> &[Node] {
    match &program.kind {
        NodeKind::Program { body } => body,
        _ => panic!("expected program"),
    }
}

#[test]
fn test_document_skips_broken_statement() {
    let (program, errors) = parse_document("const a = 1;\nconst b = ;\nconst c = 3;");
    assert_eq!(errors.len(), 1);
    let body = statements(&program);
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|s| matches!(s.kind, NodeKind::VariableDeclaration { .. })));
}

#[test]
fn test_document_accepts_unclosed_blocks_at_eof() {
    let source = "function f(a) {\n  if (a) {\n    a.";
    let (program, errors) = parse_document(source);
    assert!(!errors.is_empty());
    let body = statements(&program);
    assert_eq!(body.len(), 1);
    let NodeKind::FunctionDeclaration(function) = &body[0].kind else {
        panic!("expected function declaration, got {}", body[0].kind_name());
    };
    let len = source.len() as u32;
    assert_eq!(function.body.span.end, len + 1);
    assert_eq!(body[0].span.end, len + 1);
}

#[test]
fn test_document_error_inside_function_stays_local() {
    let source = "function f() {\n  const x = a.;\n  return 1;\n}\nconst after = 2;";
    let (program, errors) = parse_document(source);
    assert_eq!(errors.len(), 1);
    let body = statements(&program);
    assert_eq!(body.len(), 2);
    let NodeKind::FunctionDeclaration(function) = &body[0].kind else {
        panic!("expected function declaration");
    };
    let NodeKind::Block { body: inner } = &function.body.kind else {
        panic!("expected block body");
    };
    assert_eq!(inner.len(), 1);
    assert!(matches!(inner[0].kind, NodeKind::Return { .. }));
}

#[test]
fn test_document_skips_braces_opened_by_failed_statement() {
    let source = "function f() {\n  const o = {\n    a: ,\n    b: 1\n  };\n  return o;\n}\nlet z;";
    let (program, errors) = parse_document(source);
    assert!(!errors.is_empty());
    let body = statements(&program);
    assert_eq!(body.len(), 2, "{:?}", body.iter().map(Node::kind_name).collect::<Vec<_>>());
    assert!(matches!(body[1].kind, NodeKind::VariableDeclaration { .. }));
}

#[test]
fn test_document_stray_close_brace_makes_progress() {
    let (program, errors) = parse_document("}\nlet x = 1;");
    assert_eq!(errors.len(), 1);
    assert_eq!(statements(&program).len(), 1);
}

#[test]
fn test_document_class_member_recovery() {
    let source = "class A {\n  good() {}\n  bad( {\n  other() {}\n}";
    let (program, errors) = parse_document(source);
    assert!(!errors.is_empty());
    let body = statements(&program);
    assert!(matches!(body[0].kind, NodeKind::ClassDeclaration(_)));
}
