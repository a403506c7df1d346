//! Tests for property path resolution.

use std::collections::HashMap;

use formbind::Model;
use formbind::error::ResolveError;
use formbind::path::{FieldRef, resolve};

#[derive(Debug, Default, Model)]
struct Root {
    #[field(rename = "Name")]
    name: String,
    a: Option<Inner>,
    items: Vec<Item>,
    tags: HashMap<String, Item>,
}

#[derive(Debug, Default, Model)]
struct Inner {
    b: String,
    next: Option<Box<Inner>>,
}

#[derive(Debug, Default, Model)]
struct Item {
    name: String,
    parent: Option<Box<Item>>,
}

fn item(name: &str) -> Item {
    Item {
        name: name.to_string(),
        parent: None,
    }
}

fn root_with_inner() -> Root {
    Root {
        a: Some(Inner::default()),
        items: vec![item("zero"), item("one"), item("two")],
        ..Default::default()
    }
}

// =============================================================================
// Plain paths
// =============================================================================

#[test]
fn test_resolve_single_token() {
    let root = Root::default();
    let field = resolve(&root, "Name").unwrap();
    assert_eq!(field, FieldRef::root("Name"));
    assert_eq!(field.owner(), "");
    assert_eq!(field.owner_type(), std::any::type_name::<Root>());
}

#[test]
fn test_resolve_nested_field() {
    let root = root_with_inner();
    let field = resolve(&root, "a.b").unwrap();
    assert_eq!(field, FieldRef::new("a", "b"));
    assert_eq!(field.owner_type(), std::any::type_name::<Inner>());
    assert_eq!(field.path(), "a.b");
}

#[test]
fn test_resolve_stops_at_null_intermediate() {
    let root = Root::default();
    let field = resolve(&root, "a.b").unwrap();
    assert_eq!(field, FieldRef::root("a"));
    assert_eq!(field.owner_type(), std::any::type_name::<Root>());
}

#[test]
fn test_resolve_stops_at_deeper_null() {
    let root = root_with_inner();
    let field = resolve(&root, "a.next.b").unwrap();
    assert_eq!(field, FieldRef::new("a", "next"));
}

#[test]
fn test_resolve_does_not_check_terminal_field() {
    // The last token is taken as-is, like a field name on the owner.
    let root = Root::default();
    let field = resolve(&root, "Whatever").unwrap();
    assert_eq!(field, FieldRef::root("Whatever"));
}

// =============================================================================
// Indexers
// =============================================================================

#[test]
fn test_resolve_indexed_then_field() {
    let root = root_with_inner();
    let field = resolve(&root, "items[2].name").unwrap();
    assert_eq!(field.owner(), "items[2]");
    assert_eq!(field.field(), "name");
    assert_eq!(field.owner_type(), std::any::type_name::<Item>());
    assert_eq!(field.path(), "items[2].name");
}

#[test]
fn test_resolve_indexed_null_stops() {
    let root = root_with_inner();
    let field = resolve(&root, "items[1].parent.name").unwrap();
    assert_eq!(field, FieldRef::new("items[1]", "parent"));
}

#[test]
fn test_resolve_terminal_indexer() {
    let root = root_with_inner();
    let field = resolve(&root, "items[0]").unwrap();
    assert!(field.is_indexed());
    assert_eq!(field.owner(), "items");
    assert_eq!(field.field(), "0");
    assert_eq!(field.path(), "items[0]");
}

#[test]
fn test_resolve_map_indexer() {
    let mut root = Root::default();
    root.tags.insert("home".to_string(), item("house"));
    let field = resolve(&root, "tags[home].name").unwrap();
    assert_eq!(field.path(), "tags[home].name");
}

#[test]
fn test_resolve_root_indexer() {
    let root = vec![item("a"), item("b")];
    let field = resolve(&root, "[1].name").unwrap();
    assert_eq!(field.owner(), "[1]");
    assert_eq!(field.field(), "name");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_resolve_missing_intermediate_field() {
    let root = Root::default();
    let err = resolve(&root, "missing.b").unwrap_err();
    assert_eq!(
        err,
        ResolveError::FieldNotFound {
            field: "missing".to_string(),
            type_name: std::any::type_name::<Root>(),
        }
    );
    let msg = err.to_string();
    assert!(msg.contains("missing"));
    assert!(msg.contains("Root"));
}

#[test]
fn test_resolve_bad_index_key() {
    let root = root_with_inner();
    let err = resolve(&root, "items[two].name").unwrap_err();
    match err {
        ResolveError::KeyConversion { key, expected, .. } => {
            assert_eq!(key, "two");
            assert_eq!(expected, "usize");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_resolve_index_out_of_range() {
    let root = root_with_inner();
    let err = resolve(&root, "items[9].name").unwrap_err();
    assert!(matches!(err, ResolveError::IndexNotFound { ref key, .. } if key == "9"));
}

#[test]
fn test_resolve_missing_map_key() {
    let root = Root::default();
    let err = resolve(&root, "tags[office].name").unwrap_err();
    assert!(matches!(err, ResolveError::IndexNotFound { .. }));
}

#[test]
fn test_resolve_index_on_plain_object() {
    let root = root_with_inner();
    let err = resolve(&root, "a[0].b").unwrap_err();
    assert_eq!(
        err,
        ResolveError::NotIndexable {
            key: "0".to_string(),
            type_name: std::any::type_name::<Inner>(),
        }
    );
}

#[test]
fn test_resolve_empty_path_is_root_model() {
    let root = Root::default();
    let field = resolve(&root, "").unwrap();
    assert_eq!(field, FieldRef::model(""));
    assert!(field.is_model());
    assert_eq!(field.owner_type(), std::any::type_name::<Root>());
}

#[test]
fn test_resolve_trailing_separator() {
    let root = root_with_inner();
    assert!(matches!(
        resolve(&root, "a."),
        Err(ResolveError::InvalidPath(_))
    ));
}

#[test]
fn test_resolve_empty_token() {
    let root = root_with_inner();
    assert!(matches!(
        resolve(&root, "a..b"),
        Err(ResolveError::InvalidPath(_))
    ));
}

// =============================================================================
// FieldRef
// =============================================================================

#[test]
fn test_field_ref_display() {
    assert_eq!(FieldRef::root("Name").to_string(), "Name");
    assert_eq!(FieldRef::new("a", "b").to_string(), "a.b");
    assert_eq!(FieldRef::model("a").to_string(), "a");
}

#[test]
fn test_field_ref_equality_ignores_owner_type() {
    let root = Root::default();
    let resolved = resolve(&root, "Name").unwrap();
    assert_eq!(resolved, FieldRef::root("Name"));
    assert_ne!(resolved, FieldRef::new("a", "Name"));
}

#[test]
fn test_field_ref_model() {
    let field = FieldRef::model("a");
    assert!(field.is_model());
    assert!(!FieldRef::root("Name").is_model());
}
