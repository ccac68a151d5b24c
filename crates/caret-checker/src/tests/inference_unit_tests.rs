use super::*;
use caret_solver::MemberKind;

#[test]
fn test_string_key() {
    assert_eq!(string_key("'name'"), Some("name"));
    assert_eq!(string_key("\"name\""), Some("name"));
    assert_eq!(string_key("0"), None);
    assert_eq!(string_key("'name\""), None);
}

#[test]
fn test_indexed_element() {
    assert_eq!(
        indexed_element(&TypeDescriptor::array(TypeDescriptor::number())),
        TypeDescriptor::number()
    );
    assert_eq!(
        indexed_element(&TypeDescriptor::string()),
        TypeDescriptor::string()
    );
    assert_eq!(
        indexed_element(&TypeDescriptor::named("NodeList")),
        TypeDescriptor::named("HTMLElement")
    );
    assert_eq!(
        indexed_element(&TypeDescriptor::number()),
        TypeDescriptor::Unknown
    );
}

#[test]
fn test_member_value_for_methods() {
    let method = ResolvedMember {
        name: "trim".to_string(),
        kind: MemberKind::Method,
        type_info: TypeDescriptor::string(),
    };
    assert_eq!(member_value(method.clone(), true), TypeDescriptor::string());
    match member_value(method, false) {
        TypeDescriptor::Function { name, return_type, .. } => {
            assert_eq!(name.as_deref(), Some("trim"));
            assert_eq!(*return_type, TypeDescriptor::string());
        }
        other => panic!("expected a function, got {other}"),
    }
}

#[test]
fn test_member_value_for_function_properties() {
    let property = ResolvedMember {
        name: "handler".to_string(),
        kind: MemberKind::Property,
        type_info: TypeDescriptor::function(None, Vec::new(), TypeDescriptor::boolean()),
    };
    assert_eq!(member_value(property, true), TypeDescriptor::boolean());
}
