use std::time::Duration;

use formbind::prelude::*;

#[derive(Debug, Clone, Default, Model)]
pub struct Person {
    #[field(rename = "Name")]
    pub name: String,
    #[field(rename = "Age")]
    pub age: i32,
    #[field(rename = "EmailAddress")]
    pub email_address: String,
}

pub fn person_rules() -> Result<RuleSet<Person>, RuleError> {
    RuleSet::builder("person")
        .rule_for("Name", |p: &Person| p.name.clone())
        .required("You must enter a name")
        .max_length(50, "Name cannot be longer than 50 characters")
        .rule_for("Age", |p: &Person| p.age)
        .not_default("Age must be greater than 0")
        .less_than(150, "Age cannot be greater than 150")
        .rule_for("EmailAddress", |p: &Person| p.email_address.clone())
        .required("You must enter a email address")
        .email("You must provide a valid email address")
        .build()
}

pub fn person_unique_rules() -> Result<RuleSet<Person>, RuleError> {
    RuleSet::builder("person-unique")
        .asynchronous()
        .rule_for("Name", |p: &Person| p.name.clone())
        .must_async(is_unique, "Name must be unique")
        .when(|p| !p.name.is_empty())
        .build()
}

async fn is_unique(name: String) -> bool {
    tokio::time::sleep(Duration::from_millis(250)).await;
    name.to_lowercase() != "test"
}

register_rule_set!(Person, person_rules);
register_rule_set!(Person, person_unique_rules);
