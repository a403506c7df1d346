//! Tests for the validation message store.

use formbind::path::FieldRef;
use formbind::store::MessageStore;

#[test]
fn test_add_and_read_messages() {
    let mut store = MessageStore::new();
    let name = FieldRef::root("Name");
    store.add(&name, "required");
    store.add(&name, "too short");

    assert_eq!(store.messages_for(&name), ["required", "too short"]);
    assert_eq!(store.len(), 2);
    assert!(store.has_messages(&name));
    assert!(!store.is_empty());
}

#[test]
fn test_add_all_empty_creates_no_entry() {
    let mut store = MessageStore::new();
    store.add_all(&FieldRef::root("Name"), Vec::<String>::new());
    assert!(store.is_empty());
    assert_eq!(store.fields().count(), 0);
}

#[test]
fn test_clear_field_keeps_other_fields() {
    let mut store = MessageStore::new();
    let name = FieldRef::root("Name");
    let age = FieldRef::root("Age");
    store.add(&name, "required");
    store.add(&age, "too old");

    store.clear_field(&name);
    assert!(store.messages_for(&name).is_empty());
    assert_eq!(store.messages_for(&age), ["too old"]);
}

#[test]
fn test_clear_removes_everything() {
    let mut store = MessageStore::new();
    store.add(&FieldRef::root("Name"), "required");
    store.add(&FieldRef::new("address", "city"), "required");
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.messages().count(), 0);
}

#[test]
fn test_messages_keep_field_order() {
    let mut store = MessageStore::new();
    store.add(&FieldRef::root("Age"), "a");
    store.add(&FieldRef::root("Name"), "b");
    store.add(&FieldRef::root("Age"), "c");

    let all: Vec<&str> = store.messages().collect();
    assert_eq!(all, vec!["a", "c", "b"]);
}

#[test]
fn test_messages_for_owner() {
    let mut store = MessageStore::new();
    store.add(&FieldRef::root("Name"), "root");
    store.add(&FieldRef::new("address", "city"), "city");
    store.add(&FieldRef::model("address"), "address");

    let address: Vec<&str> = store.messages_for_owner("address").collect();
    assert_eq!(address, vec!["city", "address"]);
    let root: Vec<&str> = store.messages_for_owner("").collect();
    assert_eq!(root, vec!["root"]);
}

#[test]
fn test_snapshot_serializes() {
    let mut store = MessageStore::new();
    store.add(&FieldRef::root("Name"), "Name must be unique");

    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json[0]["field"]["field"], "Name");
    assert_eq!(json[0]["messages"][0], "Name must be unique");
}
