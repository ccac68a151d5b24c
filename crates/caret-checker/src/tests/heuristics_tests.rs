use super::*;

#[test]
fn test_element_methods() {
    assert_eq!(
        guess_method_result("querySelector"),
        Some(TypeDescriptor::named("HTMLElement"))
    );
    assert_eq!(
        guess_method_result("querySelectorAll"),
        Some(TypeDescriptor::named("NodeList"))
    );
    assert_eq!(guess_method_result("toUpperCase"), None);
}

#[test]
fn test_element_names() {
    assert_eq!(
        guess_from_name("submitButton"),
        Some(TypeDescriptor::named("HTMLButtonElement"))
    );
    assert_eq!(
        guess_from_name("emailInput"),
        Some(TypeDescriptor::named("HTMLInputElement"))
    );
    assert_eq!(
        guess_from_name("modal"),
        Some(TypeDescriptor::named("HTMLElement"))
    );
    assert_eq!(
        guess_from_name("headerEl"),
        Some(TypeDescriptor::named("HTMLElement"))
    );
}

#[test]
fn test_value_names() {
    assert_eq!(guess_from_name("isOpen"), Some(TypeDescriptor::boolean()));
    assert_eq!(guess_from_name("hasItems"), Some(TypeDescriptor::boolean()));
    assert_eq!(guess_from_name("userName"), Some(TypeDescriptor::string()));
    assert_eq!(guess_from_name("itemCount"), Some(TypeDescriptor::number()));
    assert_eq!(
        guess_from_name("todoList"),
        Some(TypeDescriptor::array(TypeDescriptor::Unknown))
    );
}

#[test]
fn test_prefix_needs_word_boundary() {
    // "island" starts with "is" but is not a predicate name
    assert_eq!(guess_from_name("island"), None);
    assert_eq!(guess_from_name("hash"), None);
}

#[test]
fn test_plain_names_get_no_guess() {
    assert_eq!(guess_from_name("foo"), None);
    assert_eq!(guess_from_name("bar"), None);
    assert_eq!(guess_from_name("data"), None);
    assert_eq!(guess_from_name(""), None);
}
