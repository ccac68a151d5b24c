//! Tests for the scope-construction pass
//!
//! - Declarations and their inferred types
//! - Function, arrow, block, class and catch scopes
//! - Hoisting and destructuring
//! - Documents that are still being typed

use caret_binder::{
    BinderOptions, BinderState, ScopeKind, ScopeTree, SymbolKind, bind_source,
    lookup_member_inherited,
};
use caret_solver::{ClassSide, MemberKind, TypeDescriptor};

fn offset_of(source: &str, needle: &str) -> u32 {
    source.find(needle).expect("needle present") as u32
}

fn type_at(tree: &ScopeTree, offset: u32, name: &str) -> Option<TypeDescriptor> {
    let scope = tree.find_scope_at_offset(ScopeTree::ROOT, offset);
    tree.resolve(scope, name).and_then(|s| s.type_info.clone())
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_object_literal_binding_has_shape() {
    let tree = bind_source("const user = { name: \"Alice\", age: 30 };");
    let user = tree.resolve(ScopeTree::ROOT, "user").expect("user declared");
    assert_eq!(user.kind, SymbolKind::Constant);
    let ty = user.type_info.clone().expect("typed");
    let shape = ty.shape().expect("object shape");
    assert_eq!(shape.len(), 2);
    assert_eq!(shape.get("name"), Some(&TypeDescriptor::string()));
    assert_eq!(shape.get("age"), Some(&TypeDescriptor::number()));
}

#[test]
fn test_variable_kinds() {
    let tree = bind_source("var a = 1; let b = 'x'; const c = [true];");
    let root = tree.get(ScopeTree::ROOT).expect("root");
    assert_eq!(root.symbols["a"].kind, SymbolKind::Variable);
    assert_eq!(root.symbols["b"].kind, SymbolKind::Variable);
    assert_eq!(root.symbols["c"].kind, SymbolKind::Constant);
    assert_eq!(
        root.symbols["c"].type_info,
        Some(TypeDescriptor::array(TypeDescriptor::boolean()))
    );
}

#[test]
fn test_destructuring_declares_each_name() {
    let source = "const { name, age: years, ...rest } = { name: 'a', age: 1 };\nconst [first, second] = ['x', 'y'];";
    let tree = bind_source(source);
    assert_eq!(type_at(&tree, 0, "name"), Some(TypeDescriptor::string()));
    assert_eq!(type_at(&tree, 0, "years"), Some(TypeDescriptor::number()));
    assert!(tree.resolve(ScopeTree::ROOT, "rest").is_some());
    assert!(tree.resolve(ScopeTree::ROOT, "age").is_none());
    assert_eq!(type_at(&tree, 0, "second"), Some(TypeDescriptor::string()));
}

#[test]
fn test_assignment_types_untyped_binding() {
    let tree = bind_source("let el;\nel = document.createElement('div');");
    assert_eq!(type_at(&tree, 0, "el"), Some(TypeDescriptor::named("HTMLElement")));
}

#[test]
fn test_assignment_tracking_can_be_disabled() {
    let mut binder = BinderState::with_options(BinderOptions {
        track_assignments: false,
        ..BinderOptions::default()
    });
    binder.bind_source("let el;\nel = document.createElement('div');");
    assert_eq!(type_at(binder.scopes(), 0, "el"), None);
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn test_function_scope_parameters_and_locals() {
    let source = "function greet(name = 'x', times) {\n  const msg = name.toUpperCase();\n  return msg;\n}";
    let tree = bind_source(source);
    let inside = offset_of(source, "return");

    let scope = tree.find_scope_at_offset(ScopeTree::ROOT, inside);
    assert_eq!(tree.get(scope).map(|s| s.kind), Some(ScopeKind::Function));
    assert_eq!(type_at(&tree, inside, "msg"), Some(TypeDescriptor::string()));
    assert_eq!(type_at(&tree, inside, "name"), Some(TypeDescriptor::string()));
    let times = tree.resolve(scope, "times").expect("times declared");
    assert_eq!(times.kind, SymbolKind::Parameter);
    assert_eq!(times.type_info, None);

    // Locals are not visible outside.
    assert!(tree.resolve(ScopeTree::ROOT, "msg").is_none());

    let greet = tree.resolve(ScopeTree::ROOT, "greet").expect("greet declared");
    assert_eq!(greet.kind, SymbolKind::Function);
    let ty = greet.type_info.clone().expect("typed");
    assert_eq!(ty.call_result(), TypeDescriptor::string());
}

#[test]
fn test_function_declarations_are_hoisted() {
    let tree = bind_source("const r = later();\nfunction later() { return 1; }");
    assert_eq!(type_at(&tree, 0, "r"), Some(TypeDescriptor::number()));
}

#[test]
fn test_var_is_function_scoped_let_is_block_scoped() {
    let source = "function f() {\n  if (a) {\n    var v = 1;\n    let w = 2;\n  }\n  end;\n}";
    let tree = bind_source(source);
    let after_block = offset_of(source, "end;");
    let in_block = offset_of(source, "let w");
    assert!(type_at(&tree, after_block, "v").is_some());
    assert!(type_at(&tree, after_block, "w").is_none());
    assert!(type_at(&tree, in_block, "w").is_some());
    assert!(tree.resolve(ScopeTree::ROOT, "v").is_none());
}

#[test]
fn test_arrow_function_scope() {
    let source = "const add = (a, b = 2) => a + b;\nconst later = 1;";
    let tree = bind_source(source);
    let body = offset_of(source, "a + b");
    let scope = tree.find_scope_at_offset(ScopeTree::ROOT, body);
    assert_eq!(tree.get(scope).map(|s| s.kind), Some(ScopeKind::Arrow));
    assert_eq!(type_at(&tree, body, "b"), Some(TypeDescriptor::number()));
    let add = tree.resolve(ScopeTree::ROOT, "add").expect("add");
    assert!(matches!(add.type_info, Some(TypeDescriptor::Function { .. })));
}

#[test]
fn test_for_of_binds_element_type() {
    let source = "const items = ['a'];\nfor (const item of items) {\n  item;\n}";
    let tree = bind_source(source);
    let inside = offset_of(source, "item;");
    assert_eq!(type_at(&tree, inside, "item"), Some(TypeDescriptor::string()));
    assert!(tree.resolve(ScopeTree::ROOT, "item").is_none());
}

#[test]
fn test_catch_parameter() {
    let source = "try {\n  run();\n} catch (err) {\n  log(err);\n}";
    let tree = bind_source(source);
    let inside = offset_of(source, "log(");
    let scope = tree.find_scope_at_offset(ScopeTree::ROOT, inside);
    assert_eq!(tree.get(scope).map(|s| s.kind), Some(ScopeKind::Catch));
    assert_eq!(type_at(&tree, inside, "err"), Some(TypeDescriptor::named("Error")));
}

// =============================================================================
// Classes
// =============================================================================

const ANIMALS: &str = "class Animal {
  constructor(name) {
    this.name = name;
    this.legs = 4;
  }
  speak() { return '...'; }
}
class Dog extends Animal {
  bark() {
    return this.speak();
  }
}
const d = new Dog();";

#[test]
fn test_class_members_and_instances() {
    let tree = bind_source(ANIMALS);
    let d = tree.resolve(ScopeTree::ROOT, "d").expect("d").type_or_unknown();
    let class = d.as_class().expect("class instance");
    assert_eq!(class.name, "Dog");
    assert_eq!(class.side, ClassSide::Instance);
    assert_eq!(class.parent.as_deref(), Some("Animal"));

    let legs = lookup_member_inherited(&tree, ScopeTree::ROOT, &d, "legs").expect("inherited");
    assert_eq!(legs.type_info, TypeDescriptor::number());
    let bark = lookup_member_inherited(&tree, ScopeTree::ROOT, &d, "bark").expect("own");
    assert_eq!(bark.kind, MemberKind::Method);
    assert_eq!(bark.type_info, TypeDescriptor::string());
}

#[test]
fn test_class_scope_holds_members() {
    let tree = bind_source(ANIMALS);
    let animal_scope = tree.find_class_scope("Animal").expect("class scope");
    let scope = tree.get(animal_scope).expect("scope");
    assert_eq!(scope.kind, ScopeKind::Class);
    assert_eq!(scope.symbols["speak"].kind, SymbolKind::Method);
    assert_eq!(scope.symbols["legs"].kind, SymbolKind::Property);
}

#[test]
fn test_this_inside_method_is_instance() {
    let tree = bind_source(ANIMALS);
    let inside = offset_of(ANIMALS, "this.speak");
    let scope = tree.find_scope_at_offset(ScopeTree::ROOT, inside);
    let this = tree.this_type(scope);
    assert_eq!(this.as_class().map(|c| c.name.as_str()), Some("Dog"));
    assert_eq!(this.as_class().map(|c| c.side), Some(ClassSide::Instance));
}

#[test]
fn test_class_expression_takes_binding_name() {
    let tree = bind_source("const Point = class { norm() { return 1; } };\nconst p = new Point();");
    let p = tree.resolve(ScopeTree::ROOT, "p").expect("p").type_or_unknown();
    assert_eq!(p.as_class().map(|c| c.name.as_str()), Some("Point"));
}

// =============================================================================
// Incomplete documents
// =============================================================================

#[test]
fn test_cursor_at_end_of_unclosed_function() {
    let source = "function f(a) {\n  const local = 1;\n  lo";
    let mut binder = BinderState::new();
    binder.bind_source(source);
    let tree = binder.scopes();
    let scope = tree.find_scope_at_offset(ScopeTree::ROOT, source.len() as u32);
    assert_eq!(tree.get(scope).map(|s| s.kind), Some(ScopeKind::Function));
    let names: Vec<&str> = tree
        .visible_symbols(scope)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert!(names.contains(&"local"));
    assert!(names.contains(&"a"));
    assert!(names.contains(&"f"));
}

#[test]
fn test_strict_mode_binds_nothing_on_error() {
    let mut binder = BinderState::with_options(BinderOptions {
        recover: false,
        ..BinderOptions::default()
    });
    binder.bind_source("const a = 1;\nconst b = ;");
    assert!(!binder.parse_errors.is_empty());
    assert!(binder.scopes().resolve(ScopeTree::ROOT, "a").is_none());
}

#[test]
fn test_recovery_keeps_later_declarations() {
    let mut binder = BinderState::new();
    binder.bind_source("const a = 1;\nconst b = ;\nconst c = 'x';");
    assert_eq!(binder.parse_errors.len(), 1);
    assert!(binder.scopes().resolve(ScopeTree::ROOT, "a").is_some());
    assert_eq!(type_at(binder.scopes(), 0, "c"), Some(TypeDescriptor::string()));
}

#[test]
fn test_scope_ranges_nest() {
    let source = "function outer(x) {\n  const f = (y) => {\n    if (y) { return [x, y].map(z => z); }\n  };\n  class K { m() { try {} catch (e) {} } }\n}\nconst tail = 1;";
    let tree = bind_source(source);
    assert!(tree.len() > 6);
    for (id, scope) in tree.iter() {
        for child in &scope.children {
            let child_scope = tree.get(*child).expect("child exists");
            assert_eq!(child_scope.parent, id);
            assert_eq!(child_scope.depth, scope.depth + 1);
            assert!(
                scope.start <= child_scope.start && child_scope.end <= scope.end,
                "child [{}, {}) escapes parent [{}, {})",
                child_scope.start,
                child_scope.end,
                scope.start,
                scope.end
            );
        }
    }
}
