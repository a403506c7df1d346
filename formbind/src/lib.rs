//! Field-level and submit-time validation for form models.
//!
//! Field changes run synchronous rule sets scoped to the changed field;
//! submissions run asynchronous rule sets against the whole model and map
//! each failure back to a field through its property path.

// Lets `#[derive(Model)]` output refer to `::formbind` inside this crate too.
extern crate self as formbind;

pub mod access;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod path;
pub mod rules;
pub mod state;
pub mod store;
pub mod subscription;
pub mod summary;

pub use formbind_derive::Model;

#[doc(hidden)]
pub use inventory;

pub mod prelude {
    pub use crate::access::{FieldAccess, Lookup};
    pub use crate::config::{FormConfig, SubmitPolicy};
    pub use crate::context::EditContext;
    pub use crate::dispatch::ValidationDispatcher;
    pub use crate::error::{FormError, ResolveError, RuleError, ValidationError};
    pub use crate::form::{FormSource, SubmitOutcome, ValidatedForm};
    pub use crate::path::{FieldRef, resolve};
    pub use crate::register_rule_set;
    pub use crate::rules::{
        Failure, InventoryProvider, RuleKind, RuleSet, RuleSetKind, RuleSetProvider,
        RuleSetRegistry,
    };
    pub use crate::state::State;
    pub use crate::store::MessageStore;
    pub use crate::subscription::Subscription;
    pub use crate::summary::ValidationSummary;

    pub use formbind_derive::Model;
}
