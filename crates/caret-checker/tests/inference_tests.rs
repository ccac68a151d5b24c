//! End-to-end inference tests: bind a document, then ask for the type of
//! the text in front of a cursor and the members it offers.

use caret_binder::{ScopeTree, bind_source};
use caret_checker::{InferenceOptions, MemberInfo, TypeInference, sort_order};
use caret_common::LineMap;
use caret_solver::{ClassSide, MemberKind, TypeDescriptor, fallback_members};

struct Document {
    tree: ScopeTree,
    line_map: LineMap,
}

impl Document {
    fn new(source: &str) -> Self {
        Document {
            tree: bind_source(source),
            line_map: LineMap::build(source),
        }
    }

    fn inference(&self) -> TypeInference<'_> {
        TypeInference::new(&self.tree, &self.line_map)
    }

    fn type_at_end(&self, expr: &str) -> TypeDescriptor {
        self.inference().get_type_at_offset(expr, self.line_map.len())
    }

    fn members_at_end(&self, expr: &str) -> Vec<MemberInfo> {
        let inference = self.inference();
        let ty = inference.get_type_at_offset(expr, self.line_map.len());
        inference.get_members_of_type(&ty)
    }
}

fn labels(members: &[MemberInfo]) -> Vec<&str> {
    members.iter().map(|m| m.label.as_str()).collect()
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_object_literal_members_are_exactly_its_keys() {
    let doc = Document::new("const user = { name: \"Alice\", age: 30 };\n");
    let ty = doc.type_at_end("user.");
    let shape = ty.shape().expect("object shape");
    assert_eq!(shape.get("name"), Some(&TypeDescriptor::string()));
    assert_eq!(shape.get("age"), Some(&TypeDescriptor::number()));

    let members = doc.members_at_end("user.");
    assert_eq!(labels(&members), vec!["age", "name"]);
    assert!(members.iter().all(|m| m.kind == MemberKind::Property));
    assert!(members.iter().all(|m| !m.is_unknown));
}

#[test]
fn test_string_method_chain() {
    let doc = Document::new("");
    let ty = doc.type_at_end("'hello'.toUpperCase().");
    assert_eq!(ty, TypeDescriptor::string());

    let members = doc.members_at_end("'hello'.toUpperCase().");
    let names = labels(&members);
    assert!(names.contains(&"toLowerCase"), "got {names:?}");
    assert!(names.contains(&"length"), "got {names:?}");
    assert!(!names.contains(&"push"), "got {names:?}");
    assert!(members.iter().all(|m| !m.is_unknown));
}

#[test]
fn test_unresolved_chain_falls_back() {
    let doc = Document::new("let x = 1;");
    let ty = doc.type_at_end("foo.bar.");
    assert_eq!(ty, TypeDescriptor::Unknown);

    let members = doc.members_at_end("foo.bar.");
    assert_eq!(members.len(), fallback_members().len());
    assert!(members.iter().all(|m| m.is_unknown));
    assert!(members.iter().all(|m| m.sort_order == sort_order::UNKNOWN));
    let names = labels(&members);
    for expected in ["charAt", "push", "hasOwnProperty"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_inference_is_idempotent() {
    let doc = Document::new("const items = ['a', 'b'];\nfunction f(n) { return n * 2; }\n");
    let inference = doc.inference();
    for expr in ["items.", "items[0].", "f().", "foo.bar."] {
        let first = inference.get_type_of_expression(expr, 1, 0);
        let second = inference.get_type_of_expression(expr, 1, 0);
        assert_eq!(first, second, "{expr}");
    }
}

// =============================================================================
// Scopes and positions
// =============================================================================

const GREETER: &str = "function greet(person) {
  const message = 'hi ' + person;
  return message;
}
const total = 3;
";

#[test]
fn test_local_binding_is_visible_only_inside_its_function() {
    let doc = Document::new(GREETER);
    let inference = TypeInference::with_options(
        &doc.tree,
        &doc.line_map,
        InferenceOptions { best_guess: false },
    );
    assert_eq!(
        inference.get_type_of_expression("message.", 2, 2),
        TypeDescriptor::string()
    );
    assert_eq!(
        inference.get_type_of_expression("message.", 4, 0),
        TypeDescriptor::Unknown
    );
    assert_eq!(
        inference.get_type_of_expression("total.", 4, 0),
        TypeDescriptor::number()
    );
}

#[test]
fn test_function_call_result() {
    let doc = Document::new(GREETER);
    assert_eq!(doc.type_at_end("greet('x')."), TypeDescriptor::string());
    assert_eq!(doc.type_at_end("greet('x').trim()."), TypeDescriptor::string());
}

#[test]
fn test_line_past_end_reads_as_end_of_document() {
    let doc = Document::new(GREETER);
    assert_eq!(
        doc.inference().get_type_of_expression("total.", 99, 0),
        TypeDescriptor::number()
    );
}

// =============================================================================
// Built-ins
// =============================================================================

#[test]
fn test_dom_chain() {
    let doc = Document::new("");
    assert_eq!(
        doc.type_at_end("document.querySelector('#app').classList."),
        TypeDescriptor::named("DOMTokenList")
    );
}

#[test]
fn test_index_and_literal_heads() {
    let doc = Document::new("const rows = [{ id: 1 }];\n");
    let row = doc.type_at_end("rows[0].");
    assert_eq!(row.shape().map(|s| s.len()), Some(1));
    assert_eq!(doc.type_at_end("rows[0]['id']."), TypeDescriptor::number());
    assert_eq!(
        doc.type_at_end("[1, 2, 3]."),
        TypeDescriptor::array(TypeDescriptor::number())
    );
    assert_eq!(
        doc.type_at_end("'a,b'.split(',')[0]."),
        TypeDescriptor::string()
    );
}

#[test]
fn test_function_values_offer_function_members() {
    let doc = Document::new("const shout = (s) => 'x';\n");
    let members = doc.members_at_end("shout.");
    assert_eq!(
        labels(&members),
        vec!["apply", "bind", "call", "length", "name"]
    );
    let call = members.iter().find(|m| m.label == "call").expect("call");
    assert_eq!(call.type_info, TypeDescriptor::string());
}

// =============================================================================
// Classes
// =============================================================================

const ANIMALS: &str = "class Animal {
  constructor(name) {
    this.name = name;
    this.legs = 4;
    this._id = 0;
  }
  speak() { return '...'; }
}
class Dog extends Animal {
  bark() {
    return this.speak();
  }
  static create() { return 'dog'; }
}
const d = new Dog();
";

#[test]
fn test_class_instance_members_with_inheritance() {
    let doc = Document::new(ANIMALS);
    let members = doc.members_at_end("d.");
    let names = labels(&members);
    assert_eq!(names, vec!["bark", "legs", "name", "speak", "_id"]);

    let bark = &members[0];
    assert_eq!(bark.kind, MemberKind::Method);
    assert_eq!(bark.sort_order, sort_order::OWN);
    let speak = members.iter().find(|m| m.label == "speak").expect("speak");
    assert_eq!(speak.sort_order, sort_order::INHERITED);
    assert_eq!(members[4].sort_order, sort_order::PRIVATE);
    assert!(!names.contains(&"create"));
}

#[test]
fn test_class_constructor_side() {
    let doc = Document::new(ANIMALS);
    let members = doc.members_at_end("Dog.");
    let names = labels(&members);
    assert_eq!(names.first(), Some(&"create"));
    assert!(names.contains(&"bind"));
    assert!(!names.contains(&"bark"));

    assert_eq!(doc.type_at_end("Dog.create()."), TypeDescriptor::string());
    let class = doc.type_at_end("new Dog().");
    let class = class.as_class().expect("class instance");
    assert_eq!(class.name, "Dog");
    assert_eq!(class.side, ClassSide::Instance);
}

#[test]
fn test_this_inside_method() {
    let doc = Document::new(ANIMALS);
    let offset = ANIMALS.find("return this.speak").expect("bark body") as u32;
    let inference = doc.inference();
    let this = inference.get_type_at_offset("this.", offset);
    assert_eq!(this.as_class().map(|c| c.name.as_str()), Some("Dog"));
    assert_eq!(
        inference.get_type_at_offset("this.speak().", offset),
        TypeDescriptor::string()
    );
    assert_eq!(
        inference.get_type_at_offset("this.legs.", offset),
        TypeDescriptor::number()
    );
}

#[test]
fn test_member_info_serializes_camel_case() {
    let doc = Document::new("const user = { name: 'a' };");
    let members = doc.members_at_end("user.");
    let json = serde_json::to_value(&members[0]).expect("serialize");
    assert_eq!(json["label"], "name");
    assert_eq!(json["kind"], "property");
    assert_eq!(json["isUnknown"], false);
    assert_eq!(json["sortOrder"], 0);
    assert_eq!(json["typeInfo"]["kind"], "primitive");
}

// =============================================================================
// Best guesses
// =============================================================================

#[test]
fn test_best_guess_from_names() {
    let doc = Document::new("let submitButton;\n");
    assert_eq!(
        doc.type_at_end("submitButton."),
        TypeDescriptor::named("HTMLButtonElement")
    );
    assert_eq!(
        doc.type_at_end("panel.querySelector('a')."),
        TypeDescriptor::named("HTMLElement")
    );

    let inference = TypeInference::with_options(
        &doc.tree,
        &doc.line_map,
        InferenceOptions { best_guess: false },
    );
    assert_eq!(
        inference.get_type_at_offset("submitButton.", doc.line_map.len()),
        TypeDescriptor::Unknown
    );
}
