//! Tests for `#[derive(Model)]`.

use formbind::Model;
use formbind::access::{FieldAccess, Lookup};
use formbind::path::{FieldRef, resolve};

#[derive(Debug, Default, Model)]
struct Account {
    #[field(rename = "UserName")]
    user_name: String,
    #[field(skip)]
    password: String,
    profile: Option<Profile>,
    r#type: u8,
}

#[derive(Debug, Default, Model)]
struct Profile {
    bio: String,
}

#[derive(Debug, Default, Model)]
struct Wrapper<T> {
    inner: T,
}

fn lookup_type(value: &dyn FieldAccess, name: &str) -> Option<&'static str> {
    value.field(name).and_then(Lookup::value).map(|v| v.type_name())
}

#[test]
fn test_renamed_field() {
    let account = Account::default();
    assert_eq!(
        lookup_type(&account, "UserName"),
        Some(std::any::type_name::<String>())
    );
    assert!(account.field("user_name").is_none());
}

#[test]
fn test_skipped_field() {
    let account = Account {
        password: "secret".to_string(),
        ..Default::default()
    };
    assert!(account.field("password").is_none());
}

#[test]
fn test_raw_identifier_field() {
    let account = Account::default();
    assert_eq!(lookup_type(&account, "type"), Some("u8"));
}

#[test]
fn test_option_field_reports_null() {
    let mut account = Account::default();
    assert!(account.field("profile").is_some_and(|l| l.is_null()));

    account.profile = Some(Profile::default());
    assert_eq!(
        lookup_type(&account, "profile"),
        Some(std::any::type_name::<Profile>())
    );
}

#[test]
fn test_type_name() {
    assert_eq!(
        Account::default().type_name(),
        std::any::type_name::<Account>()
    );
}

#[test]
fn test_generic_struct() {
    let wrapped = Wrapper {
        inner: Profile {
            bio: "hi".to_string(),
        },
    };
    let field = resolve(&wrapped, "inner.bio").unwrap();
    assert_eq!(field, FieldRef::new("inner", "bio"));
    assert_eq!(field.owner_type(), std::any::type_name::<Profile>());
}

#[test]
fn test_derived_struct_is_not_indexable() {
    assert!(Account::default().index("0").is_err());
}
