use crate::evaluate::*;
use crate::types::{ClassSide, MemberKind, TypeDescriptor};
use caret_parser::{NodeKind, parse_expression, parse_program};

fn type_of(source: &str) -> TypeDescriptor {
    let node = parse_expression(source).expect("expression parses");
    evaluate_standalone(&node)
}

#[test]
fn test_literals() {
    assert_eq!(type_of("'a'"), TypeDescriptor::string());
    assert_eq!(type_of("`a${b}`"), TypeDescriptor::string());
    assert_eq!(type_of("1.5e3"), TypeDescriptor::number());
    assert_eq!(type_of("true"), TypeDescriptor::boolean());
    assert_eq!(type_of("[1, 2]"), TypeDescriptor::array(TypeDescriptor::number()));
    assert_eq!(type_of("[]"), TypeDescriptor::array(TypeDescriptor::Unknown));
}

#[test]
fn test_object_literal_shape() {
    let ty = type_of("{ name: 'Alice', age: 30, tags: ['a'] }");
    let shape = ty.shape().expect("shaped object");
    assert_eq!(shape.get("name"), Some(&TypeDescriptor::string()));
    assert_eq!(shape.get("age"), Some(&TypeDescriptor::number()));
    assert_eq!(shape.get("tags"), Some(&TypeDescriptor::array(TypeDescriptor::string())));
}

#[test]
fn test_operators() {
    assert_eq!(type_of("'a' + 1"), TypeDescriptor::string());
    assert_eq!(type_of("1 + 2"), TypeDescriptor::number());
    assert_eq!(type_of("a * b"), TypeDescriptor::number());
    assert_eq!(type_of("a === b"), TypeDescriptor::boolean());
    assert_eq!(type_of("typeof a"), TypeDescriptor::string());
    assert_eq!(type_of("a || 'x'"), TypeDescriptor::string());
    assert_eq!(type_of("ok ? [] : 'x'"), TypeDescriptor::array(TypeDescriptor::Unknown));
}

#[test]
fn test_member_and_call_chains() {
    assert_eq!(type_of("'hello'.toUpperCase()"), TypeDescriptor::string());
    assert_eq!(type_of("'a,b'.split(',')"), TypeDescriptor::array(TypeDescriptor::string()));
    assert_eq!(type_of("'a,b'.split(',')[0]"), TypeDescriptor::string());
    assert_eq!(type_of("document.querySelector('p')"), TypeDescriptor::named("HTMLElement"));
    assert_eq!(type_of("Math.max(1, 2)"), TypeDescriptor::number());
    assert_eq!(type_of("missing.thing"), TypeDescriptor::Unknown);
}

#[test]
fn test_new_builtin() {
    assert_eq!(type_of("new Map()"), TypeDescriptor::named("Map"));
    assert_eq!(type_of("new Widget()"), TypeDescriptor::Unknown);
}

#[test]
fn test_arrow_return_type() {
    let ty = type_of("(a, b = 1) => b + 2");
    let TypeDescriptor::Function { params, return_type, .. } = ty else {
        panic!("expected function");
    };
    assert_eq!(params, vec!["a", "b"]);
    assert_eq!(*return_type, TypeDescriptor::number());

    let block = type_of("() => { if (x) { return 'a'; } return 1; }");
    assert_eq!(block.call_result(), TypeDescriptor::string());
    assert_eq!(type_of("() => { go(); }").call_result(), TypeDescriptor::undefined());
}

#[test]
fn test_class_expression_members() {
    let source = "class Point {\n  constructor(x = 0) { this.x = x; this.label = 'p'; }\n  static origin() { return 0; }\n  norm() { return 1; }\n  get size() { return 'big'; }\n}";
    let program = parse_program(source).expect("program parses");
    let NodeKind::Program { body } = &program.kind else {
        panic!("expected program");
    };
    let NodeKind::ClassDeclaration(class) = &body[0].kind else {
        panic!("expected class declaration");
    };
    let class_type = TypeEvaluator::new(&EmptyEnvironment).class_type(class, "Point");
    assert_eq!(class_type.side, ClassSide::Constructor);

    let find = |name: &str| {
        class_type
            .members
            .iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("missing member {name}"))
    };
    assert_eq!(find("x").type_info, TypeDescriptor::number());
    assert_eq!(find("label").type_info, TypeDescriptor::string());
    assert!(find("origin").is_static);
    assert_eq!(find("norm").kind, MemberKind::Method);
    assert_eq!(find("norm").type_info, TypeDescriptor::number());
    assert_eq!(find("size").kind, MemberKind::Property);
    assert!(class_type.members.iter().all(|m| m.name != "constructor"));
}

#[test]
fn test_deep_nesting_degrades_to_unknown() {
    let source = format!("{}1{}", "[".repeat(40), "]".repeat(40));
    let ty = type_of(&source);
    let mut depth = 0;
    let mut current = &ty;
    while let Some(element) = current.element_type() {
        depth += 1;
        current = element;
    }
    assert!(depth < 40);
    assert!(current.is_unknown());
}
