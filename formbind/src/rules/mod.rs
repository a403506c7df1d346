//! Validation rules, rule sets and rule set providers.
//!
//! Rule sets are built with a fluent API and carry a fixed
//! [`RuleSetKind`]: synchronous sets run on every field change, asynchronous
//! sets only on submit.
//!
//! # Example
//!
//! ```ignore
//! use formbind::rules::RuleSet;
//!
//! let sync = RuleSet::<Person>::builder("person")
//!     .rule_for("Name", |p: &Person| p.name.clone())
//!         .required("You must enter a name")
//!     .build()?;
//!
//! let unique = RuleSet::<Person>::builder("person-unique")
//!     .asynchronous()
//!     .rule_for("Name", |p: &Person| p.name.clone())
//!         .must_async(is_unique, "Name must be unique")
//!         .when(|p| !p.name.is_empty())
//!     .build()?;
//! ```

mod builder;
mod provider;
mod rule;
mod set;

pub use builder::{RuleBuilder, RuleSetBuilder};
pub use provider::{
    InventoryProvider, RuleSetProvider, RuleSetRegistration, RuleSetRegistry,
    registered_rule_sets,
};
pub use rule::{Failure, Rule, RuleKind};
pub use set::{RuleSet, RuleSetKind};
