//! Tests for statement parsing in the parser.

use caret_parser::{
    MethodKind, Node, NodeKind, ParseError, ParserState, VariableKind, parse_program,
};
use caret_scanner::TokenKind;

fn program(source: &str) -> Vec<Node> {
    match parse_program(source) {
        Ok(Node {
            kind: NodeKind::Program { body },
            ..
        }) => body,
        Ok(other) => panic!("expected program, got {}", other.kind_name()),
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

#[test]
fn parse_variable_declarations() {
    let body = program("var a = 1, b; let c = 'x'\nconst d = [c]");
    assert_eq!(body.len(), 3);
    let NodeKind::VariableDeclaration { kind, declarations } = &body[0].kind else {
        panic!("expected declaration");
    };
    assert_eq!(*kind, VariableKind::Var);
    assert_eq!(declarations.len(), 2);
    assert!(matches!(&declarations[1].kind, NodeKind::VariableDeclarator { init: None, .. }));
    assert!(matches!(body[2].kind, NodeKind::VariableDeclaration { kind: VariableKind::Const, .. }));
}

#[test]
fn parse_destructuring_declaration() {
    let body = program("const { a, b: [c] } = obj;");
    let NodeKind::VariableDeclaration { declarations, .. } = &body[0].kind else {
        panic!("expected declaration");
    };
    let NodeKind::VariableDeclarator { target, .. } = &declarations[0].kind else {
        panic!("expected declarator");
    };
    assert!(matches!(target.kind, NodeKind::ObjectLiteral { .. }));
}

#[test]
fn parse_let_as_identifier() {
    let body = program("let = 5;");
    assert!(matches!(body[0].kind, NodeKind::ExpressionStatement { .. }));
}

#[test]
fn parse_function_declaration_with_params() {
    let body = program("async function load(url, opts = {}) { return fetch(url, opts); }");
    let NodeKind::FunctionDeclaration(function) = &body[0].kind else {
        panic!("expected function declaration");
    };
    assert_eq!(function.name.as_deref(), Some("load"));
    assert!(function.is_async);
    assert_eq!(function.params.len(), 2);
    assert_eq!(body[0].span.end, 64);
}

#[test]
fn parse_class_members() {
    let source = "class Dog extends Animal {\n\
                  static count = 0;\n\
                  #secret = 1;\n\
                  constructor(name) { super(name); this.name = name; }\n\
                  get label() { return this.name; }\n\
                  set label(v) {}\n\
                  static create() { return new Dog('x'); }\n\
                  async bark() {}\n\
                  }";
    let body = program(source);
    let NodeKind::ClassDeclaration(class) = &body[0].kind else {
        panic!("expected class declaration");
    };
    assert_eq!(class.name.as_deref(), Some("Dog"));
    assert!(matches!(class.superclass.as_deref().map(|n| &n.kind), Some(NodeKind::Identifier { name }) if name == "Animal"));
    assert_eq!(class.members.len(), 7);
    assert!(matches!(&class.members[0].kind, NodeKind::PropertyDefinition { key, is_static: true, .. } if key == "count"));
    assert!(matches!(&class.members[1].kind, NodeKind::PropertyDefinition { key, .. } if key == "#secret"));
    let kinds: Vec<_> = class
        .members
        .iter()
        .filter_map(|m| match &m.kind {
            NodeKind::MethodDefinition { kind, is_static, .. } => Some((*kind, *is_static)),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (MethodKind::Constructor, false),
            (MethodKind::Getter, false),
            (MethodKind::Setter, false),
            (MethodKind::Method, true),
            (MethodKind::Method, false),
        ]
    );
}

#[test]
fn parse_control_flow() {
    let source = "if (a) { b(); } else c();\n\
                  while (x) x--;\n\
                  do { y++ } while (y < 3)\n\
                  for (let i = 0; i < n; i++) {}\n\
                  for (const k in obj) {}\n\
                  for (const v of list) {}\n\
                  switch (v) { case 1: f(); break; default: g(); }\n\
                  try { risky() } catch (e) { log(e) } finally { done() }\n\
                  throw new Error('x');";
    let names: Vec<_> = program(source).iter().map(|s| s.kind_name()).collect();
    assert_eq!(
        names,
        vec!["If", "While", "DoWhile", "For", "ForInOf", "ForInOf", "Switch", "Try", "Throw"]
    );
}

#[test]
fn parse_for_in_keeps_in_out_of_the_head() {
    let body = program("for (x in obj) {}");
    let NodeKind::ForInOf { left, is_of, .. } = &body[0].kind else {
        panic!("expected for-in");
    };
    assert!(!is_of);
    assert_eq!(left.as_identifier(), Some("x"));
}

#[test]
fn parse_return_without_argument_before_line_break() {
    let body = program("function f() { return\n1 }");
    let NodeKind::FunctionDeclaration(function) = &body[0].kind else {
        panic!("expected function");
    };
    let NodeKind::Block { body } = &function.body.kind else {
        panic!("expected block");
    };
    assert!(matches!(body[0].kind, NodeKind::Return { argument: None }));
    assert_eq!(body.len(), 2);
}

#[test]
fn parse_missing_semicolon_is_an_error() {
    let err = parse_program("a b").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: TokenKind::SemicolonToken,
            found: TokenKind::Identifier,
            value: "b".to_string(),
            pos: 2,
        }
    );
}

#[test]
fn parse_unclosed_block_is_an_error_outside_recovery() {
    let err = parse_program("function f() {").unwrap_err();
    assert_eq!(err.expected(), Some(TokenKind::CloseBraceToken));
}

#[test]
fn parse_single_statement() {
    let mut parser = ParserState::new("x = 1; y = 2;");
    let first = parser.parse_statement().unwrap();
    assert_eq!((first.start(), first.end()), (0, 6));
    let second = parser.parse_statement().unwrap();
    assert_eq!(second.start(), 7);
}

#[test]
fn program_serializes_with_type_tags() {
    let body = program("a.b");
    let json = serde_json::to_value(&body[0]).unwrap();
    assert_eq!(json["type"], "ExpressionStatement");
    assert_eq!(json["expression"]["type"], "Member");
    assert_eq!(json["expression"]["property"]["name"], "b");
    assert_eq!(json["span"]["end"], 3);
}
