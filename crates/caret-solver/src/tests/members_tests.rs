use crate::members::*;
use crate::types::{ClassMember, ClassSide, ClassType, MemberKind, TypeDescriptor};
use indexmap::IndexMap;

fn names(members: &[ResolvedMember]) -> Vec<&str> {
    members.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_string_method_returns_string() {
    let member = lookup_member(&TypeDescriptor::string(), "toUpperCase").expect("member");
    assert_eq!(member.kind, MemberKind::Method);
    assert_eq!(member.type_info, TypeDescriptor::string());
}

#[test]
fn test_array_members_substitute_element_type() {
    let numbers = TypeDescriptor::array(TypeDescriptor::number());
    assert_eq!(lookup_member(&numbers, "pop").map(|m| m.type_info), Some(TypeDescriptor::number()));
    assert_eq!(
        lookup_member(&numbers, "filter").map(|m| m.type_info),
        Some(TypeDescriptor::array(TypeDescriptor::number()))
    );
    assert_eq!(
        lookup_member(&numbers, "map").map(|m| m.type_info),
        Some(TypeDescriptor::array(TypeDescriptor::Unknown))
    );
}

#[test]
fn test_shaped_object_lists_only_own_keys() {
    let mut shape = IndexMap::new();
    shape.insert("name".to_string(), TypeDescriptor::string());
    shape.insert("age".to_string(), TypeDescriptor::number());
    let user = TypeDescriptor::shaped(shape);

    let members = catalog_members(&user);
    assert_eq!(names(&members), vec!["name", "age"]);
    assert!(members.iter().all(|m| m.kind == MemberKind::Property));
    assert!(lookup_member(&user, "hasOwnProperty").is_some());
}

#[test]
fn test_shaped_function_value_is_method() {
    let mut shape = IndexMap::new();
    shape.insert(
        "greet".to_string(),
        TypeDescriptor::function(None, Vec::new(), TypeDescriptor::string()),
    );
    let members = catalog_members(&TypeDescriptor::shaped(shape));
    assert_eq!(members[0].kind, MemberKind::Method);
    assert_eq!(members[0].type_info, TypeDescriptor::string());
}

#[test]
fn test_function_members() {
    let function = TypeDescriptor::function(None, Vec::new(), TypeDescriptor::Unknown);
    let mut members = names(&catalog_members(&function))
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    members.sort();
    assert_eq!(members, vec!["apply", "bind", "call", "length", "name"]);
}

#[test]
fn test_named_object_without_catalog_uses_object_members() {
    let widget = TypeDescriptor::named("Widget");
    assert!(lookup_member(&widget, "toString").is_some());
    assert!(names(&catalog_members(&widget)).contains(&"hasOwnProperty"));
}

#[test]
fn test_class_sides() {
    let class = ClassType {
        name: "Point".to_string(),
        members: vec![
            ClassMember {
                name: "x".to_string(),
                kind: MemberKind::Property,
                is_static: false,
                type_info: TypeDescriptor::number(),
            },
            ClassMember {
                name: "origin".to_string(),
                kind: MemberKind::Method,
                is_static: true,
                type_info: TypeDescriptor::Unknown,
            },
        ],
        parent: None,
        side: ClassSide::Constructor,
    };
    let constructor = TypeDescriptor::Class(class.clone());
    assert!(lookup_member(&constructor, "origin").is_some());
    assert!(lookup_member(&constructor, "x").is_none());
    assert!(lookup_member(&constructor, "bind").is_some());

    let instance = TypeDescriptor::Class(class.with_side(ClassSide::Instance));
    assert_eq!(names(&catalog_members(&instance)), vec!["x"]);
}

#[test]
fn test_unknown_has_no_members_but_fallback_is_deduplicated() {
    assert!(lookup_member(&TypeDescriptor::Unknown, "length").is_none());
    assert!(catalog_members(&TypeDescriptor::Unknown).is_empty());

    let fallback = fallback_members();
    let fallback_names = names(&fallback);
    for expected in ["slice", "push", "hasOwnProperty", "toUpperCase"] {
        assert!(fallback_names.contains(&expected), "missing {expected}");
    }
    assert_eq!(fallback_names.iter().filter(|n| **n == "toString").count(), 1);
    assert_eq!(fallback_names.iter().filter(|n| **n == "length").count(), 1);
}
