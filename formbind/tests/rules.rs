//! Tests for rule sets and the rule builder.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formbind::Model;
use formbind::error::{RuleError, ValidationError};
use formbind::rules::{Failure, RuleKind, RuleSet, RuleSetKind};

#[derive(Debug, Default, Clone, Model)]
struct Person {
    #[field(rename = "Name")]
    name: String,
    #[field(rename = "Age")]
    age: i32,
    #[field(rename = "EmailAddress")]
    email: String,
    nickname: Option<String>,
}

fn person(name: &str, age: i32, email: &str) -> Person {
    Person {
        name: name.to_string(),
        age,
        email: email.to_string(),
        nickname: None,
    }
}

fn person_rules() -> RuleSet<Person> {
    RuleSet::builder("person")
        .rule_for("Name", |p: &Person| p.name.clone())
        .required("You must enter a name")
        .max_length(5, "Name is too long")
        .rule_for("Age", |p: &Person| p.age)
        .not_default("Age must be greater than 0")
        .less_than(150, "Age cannot be greater than 150")
        .rule_for("EmailAddress", |p: &Person| p.email.clone())
        .email("You must provide a valid email address")
        .build()
        .unwrap()
}

fn messages(failures: &[Failure]) -> Vec<&str> {
    failures.iter().map(|f| f.message.as_str()).collect()
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn test_builder_defaults_to_synchronous() {
    let set = person_rules();
    assert_eq!(set.name(), "person");
    assert_eq!(set.kind(), RuleSetKind::Synchronous);
    assert!(!set.is_async());
    assert_eq!(set.rules().len(), 5);
    assert!(set.rules().iter().all(|r| r.kind() == RuleKind::Sync));
}

#[test]
fn test_builder_asynchronous() {
    let set = RuleSet::<Person>::builder("unique")
        .asynchronous()
        .rule_for("Name", |p: &Person| p.name.clone())
        .must_async(|name: String| async move { name != "test" }, "Name must be unique")
        .build()
        .unwrap();
    assert!(set.is_async());
    assert!(set.rules()[0].is_async());
}

#[test]
fn test_builder_invalid_pattern() {
    let err = RuleSet::<Person>::builder("bad")
        .rule_for("Name", |p: &Person| p.name.clone())
        .pattern("([a-z", "Letters only")
        .build()
        .unwrap_err();
    assert!(matches!(err, RuleError::InvalidPattern { ref property, .. } if property == "Name"));
}

#[test]
fn test_with_message_replaces_last_rule_message() {
    let set = RuleSet::<Person>::builder("person")
        .rule_for("Name", |p: &Person| p.name.clone())
        .required("first")
        .min_length(3, "second")
        .with_message("Name must have at least 3 characters")
        .build()
        .unwrap();
    assert_eq!(set.rules()[0].message(), "first");
    assert_eq!(set.rules()[1].message(), "Name must have at least 3 characters");
}

// =============================================================================
// Field validation
// =============================================================================

#[test]
fn test_validate_field_scoped_to_property() {
    let set = person_rules();
    let model = person("", 0, "nope");

    let failures = set.validate_field(&model, "Name").unwrap();
    assert_eq!(messages(&failures), vec!["You must enter a name"]);
    assert!(failures.iter().all(|f| f.property == "Name"));

    let failures = set.validate_field(&model, "Age").unwrap();
    assert_eq!(messages(&failures), vec!["Age must be greater than 0"]);
}

#[test]
fn test_validate_field_multiple_failures_in_order() {
    let set = RuleSet::<Person>::builder("person")
        .rule_for("Name", |p: &Person| p.name.clone())
        .min_length(10, "too short")
        .pattern("^[0-9]+$", "digits only")
        .build()
        .unwrap();
    let failures = set.validate_field(&person("abc", 1, ""), "Name").unwrap();
    assert_eq!(messages(&failures), vec!["too short", "digits only"]);
}

#[test]
fn test_validate_field_valid_value() {
    let set = person_rules();
    let model = person("bob", 40, "bob@example.com");
    for field in ["Name", "Age", "EmailAddress"] {
        assert!(set.validate_field(&model, field).unwrap().is_empty());
    }
}

#[test]
fn test_validate_field_unknown_property_is_empty() {
    let set = person_rules();
    assert!(set.validate_field(&Person::default(), "Other").unwrap().is_empty());
}

#[test]
fn test_email_allows_empty() {
    let set = person_rules();
    assert!(
        set.validate_field(&person("a", 1, ""), "EmailAddress")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_when_skips_rules() {
    let set = RuleSet::<Person>::builder("person")
        .rule_for("Name", |p: &Person| p.name.clone())
        .min_length(3, "too short")
        .when(|p| p.age > 18)
        .build()
        .unwrap();
    assert!(set.validate_field(&person("ab", 10, ""), "Name").unwrap().is_empty());
    assert_eq!(
        set.validate_field(&person("ab", 30, ""), "Name").unwrap().len(),
        1
    );
}

#[test]
fn test_unless_inverts_condition() {
    let set = RuleSet::<Person>::builder("person")
        .rule_for("Name", |p: &Person| p.name.clone())
        .required("required")
        .unless(|p| p.age == 0)
        .build()
        .unwrap();
    assert!(set.validate_field(&person("", 0, ""), "Name").unwrap().is_empty());
    assert_eq!(set.validate_field(&person("", 5, ""), "Name").unwrap().len(), 1);
}

#[test]
fn test_present_rule_on_option() {
    let set = RuleSet::<Person>::builder("person")
        .rule_for("nickname", |p: &Person| p.nickname.clone())
        .present("Pick a nickname")
        .build()
        .unwrap();
    let failures = set.validate_field(&Person::default(), "nickname").unwrap();
    assert_eq!(messages(&failures), vec!["Pick a nickname"]);
}

#[test]
fn test_validate_field_rejects_async_rule() {
    let set = RuleSet::<Person>::builder("mixed")
        .rule_for("Name", |p: &Person| p.name.clone())
        .required("required")
        .must_async(|_name: String| async { true }, "unique")
        .build()
        .unwrap();
    let err = set.validate_field(&Person::default(), "Name").unwrap_err();
    assert_eq!(
        err,
        ValidationError::AsyncOnSyncPath {
            rule_set: "mixed".to_string(),
            property: "Name".to_string(),
        }
    );
}

#[test]
fn test_async_rule_on_other_property_does_not_block_field() {
    let set = RuleSet::<Person>::builder("mixed")
        .rule_for("Name", |p: &Person| p.name.clone())
        .must_async(|_name: String| async { true }, "unique")
        .rule_for("Age", |p: &Person| p.age)
        .greater_than(0, "positive")
        .build()
        .unwrap();
    assert!(set.ensure_sync("Age").is_ok());
    assert_eq!(set.validate_field(&Person::default(), "Age").unwrap().len(), 1);
}

// =============================================================================
// Async validation
// =============================================================================

#[tokio::test]
async fn test_validate_async_runs_all_rules_in_order() {
    let set = RuleSet::<Person>::builder("all")
        .asynchronous()
        .rule_for("Name", |p: &Person| p.name.clone())
        .must_async(|name: String| async move { name != "test" }, "Name must be unique")
        .rule_for("Age", |p: &Person| p.age)
        .less_than(150, "Age cannot be greater than 150")
        .build()
        .unwrap();

    let failures = set.validate_async(&person("test", 200, "")).await;
    assert_eq!(
        failures,
        vec![
            Failure {
                property: "Name".to_string(),
                message: "Name must be unique".to_string(),
            },
            Failure {
                property: "Age".to_string(),
                message: "Age cannot be greater than 150".to_string(),
            },
        ]
    );

    assert!(set.validate_async(&person("alice", 20, "")).await.is_empty());
}

#[tokio::test]
async fn test_validate_async_extracts_values_up_front() {
    let set = RuleSet::<Person>::builder("unique")
        .asynchronous()
        .rule_for("Name", |p: &Person| p.name.clone())
        .must_async(|name: String| async move { name != "test" }, "Name must be unique")
        .build()
        .unwrap();

    let mut model = person("test", 1, "");
    let pending = set.validate_async(&model);
    model.name = "alice".to_string();
    assert_eq!(pending.await.len(), 1);
}

#[tokio::test]
async fn test_validate_async_skips_conditional_rules() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let set = RuleSet::<Person>::builder("unique")
        .asynchronous()
        .rule_for("Name", |p: &Person| p.name.clone())
        .must_async(
            move |name: String| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    name != "test"
                }
            },
            "Name must be unique",
        )
        .when(|p| !p.name.is_empty())
        .build()
        .unwrap();

    assert!(set.validate_async(&Person::default()).await.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(set.validate_async(&person("test", 1, "")).await.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
