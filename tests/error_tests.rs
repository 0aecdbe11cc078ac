//! Tests for the Error type

use value_visit::{Category, Error, IndexKind};

#[test]
fn test_error_display_index_kind_mismatch() {
    let error = Error::IndexKindMismatch {
        expected: IndexKind::Key,
        found: IndexKind::Position,
    };
    assert_eq!(
        format!("{}", error),
        "index kind mismatch in group: expected Key, got Position"
    );
}

#[test]
fn test_error_display_empty_group() {
    assert_eq!(format!("{}", Error::EmptyGroup), "capability group has no members");
}

#[test]
fn test_error_display_handlers() {
    assert_eq!(
        format!("{}", Error::DuplicateHandler(Category::String)),
        "duplicate handler for category String"
    );
    assert_eq!(
        format!("{}", Error::MissingHandler(Category::FloatingArray)),
        "missing handler for category FloatingArray"
    );
    assert_eq!(
        format!("{}", Error::UndeclaredCategory(Category::MapReference)),
        "handler for undeclared category MapReference"
    );
    assert_eq!(
        format!("{}", Error::OverlappingHandlers(Category::Integral)),
        "category Integral is handled by more than one sub-visitor"
    );
    assert_eq!(
        format!("{}", Error::UnusedHandler),
        "handler has no category left to claim"
    );
}

#[test]
fn test_error_debug() {
    let error = Error::MissingHandler(Category::BinaryArray);
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("MissingHandler"));
    assert!(debug_str.contains("BinaryArray"));
}

#[test]
fn test_error_is_std_error() {
    fn boxed(error: Error) -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(error)
    }

    let error = boxed(Error::EmptyGroup);
    assert!(error.source().is_none());
    assert_eq!(error.to_string(), "capability group has no members");
}

#[test]
fn test_error_clone_and_eq() {
    let error = Error::DuplicateHandler(Category::Floating);
    assert_eq!(error.clone(), error);
    assert_ne!(error, Error::DuplicateHandler(Category::Integral));
}
