use crate::builtins::*;
use crate::types::{MemberKind, TypeDescriptor};

#[test]
fn test_string_catalog_has_case_methods() {
    let member = find_builtin_member("String", "toUpperCase").expect("toUpperCase");
    assert_eq!(member.kind, MemberKind::Method);
    assert_eq!(member.returns, "string");
    let length = find_builtin_member("String", "length").expect("length");
    assert_eq!(length.kind, MemberKind::Property);
}

#[test]
fn test_input_element_extends_html_element() {
    let members = builtin_members("HTMLInputElement").expect("HTMLInputElement");
    assert!(members.iter().any(|m| m.name == "placeholder"));
    assert!(members.iter().any(|m| m.name == "classList"));
    let names = members.iter().filter(|m| m.name == "value").count();
    assert_eq!(names, 1, "inherited members are not repeated");
}

#[test]
fn test_unknown_catalog_entry() {
    assert!(builtin_members("Widget").is_none());
    assert!(!is_builtin_type("Widget"));
    assert!(is_builtin_type("Document"));
}

#[test]
fn test_global_types() {
    assert_eq!(global_type("document"), Some(TypeDescriptor::named("Document")));
    assert_eq!(global_type("Math"), Some(TypeDescriptor::named("Math")));
    assert_eq!(global_type("NaN"), Some(TypeDescriptor::number()));
    assert_eq!(global_type("parseInt").map(|t| t.call_result()), Some(TypeDescriptor::number()));
    assert_eq!(global_type("user"), None);
}

#[test]
fn test_builtin_instance_types() {
    assert_eq!(builtin_instance_type("Map"), Some(TypeDescriptor::named("Map")));
    assert_eq!(builtin_instance_type("TypeError"), Some(TypeDescriptor::named("Error")));
    assert_eq!(
        builtin_instance_type("Array"),
        Some(TypeDescriptor::array(TypeDescriptor::Unknown))
    );
    assert_eq!(builtin_instance_type("Widget"), None);
}
