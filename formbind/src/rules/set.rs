//! Rule sets: named bundles of rules for one model type.

use futures::future::{BoxFuture, FutureExt};
use log::debug;
use serde::Serialize;

use super::builder::RuleSetBuilder;
use super::rule::{Check, Failure, Rule};
use crate::error::ValidationError;

/// Which dispatch path a rule set belongs to.
///
/// Fixed when the set is built. The dispatcher never inspects individual
/// rules to pick a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RuleSetKind {
    /// Evaluated on every field change, without suspending.
    #[default]
    Synchronous,
    /// Evaluated on submit, awaited.
    Asynchronous,
}

/// A named, ordered bundle of validation rules for model type `M`.
pub struct RuleSet<M> {
    pub(crate) name: String,
    pub(crate) kind: RuleSetKind,
    pub(crate) rules: Vec<Rule<M>>,
}

impl<M: 'static> RuleSet<M> {
    /// Start building a synchronous rule set.
    pub fn builder(name: impl Into<String>) -> RuleSetBuilder<M> {
        RuleSetBuilder::new(name)
    }
}

impl<M> RuleSet<M> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RuleSetKind {
        self.kind
    }

    pub fn is_async(&self) -> bool {
        self.kind == RuleSetKind::Asynchronous
    }

    pub fn rules(&self) -> &[Rule<M>] {
        &self.rules
    }

    /// Rules declared for exactly `property`.
    pub fn rules_for<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a Rule<M>> + 'a {
        self.rules.iter().filter(move |r| r.property == property)
    }

    /// Fail if any rule scoped to `property` needs to be awaited.
    pub fn ensure_sync(&self, property: &str) -> Result<(), ValidationError> {
        match self.rules_for(property).find(|r| r.is_async()) {
            Some(rule) => Err(ValidationError::AsyncOnSyncPath {
                rule_set: self.name.clone(),
                property: rule.property.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Evaluate the rules scoped to one property.
    ///
    /// Checks every scoped rule before evaluating any, so a contract
    /// violation never yields partial results.
    pub fn validate_field(&self, model: &M, property: &str) -> Result<Vec<Failure>, ValidationError> {
        self.ensure_sync(property)?;
        Ok(self
            .rules_for(property)
            .filter(|r| r.applies(model))
            .filter(|r| matches!(&r.check, Check::Sync(check) if !check(model)))
            .map(Rule::failure)
            .collect())
    }

    /// Evaluate every rule against the whole model.
    ///
    /// The returned future owns everything it needs; values are extracted
    /// from `model` before this returns. Rules run in declaration order and
    /// async rules are awaited one at a time.
    pub fn validate_async(&self, model: &M) -> BoxFuture<'static, Vec<Failure>> {
        enum Pending {
            Done(Option<Failure>),
            Awaiting(BoxFuture<'static, bool>, Failure),
        }

        let pending: Vec<Pending> = self
            .rules
            .iter()
            .filter(|r| r.applies(model))
            .map(|r| match &r.check {
                Check::Sync(check) => Pending::Done((!check(model)).then(|| r.failure())),
                Check::Async(check) => Pending::Awaiting(check(model), r.failure()),
            })
            .collect();

        let name = self.name.clone();
        async move {
            let mut failures = Vec::new();
            for p in pending {
                match p {
                    Pending::Done(failure) => failures.extend(failure),
                    Pending::Awaiting(fut, failure) => {
                        if !fut.await {
                            failures.push(failure);
                        }
                    }
                }
            }
            debug!("rule set '{}' produced {} failure(s)", name, failures.len());
            failures
        }
        .boxed()
    }
}

impl<M> std::fmt::Debug for RuleSet<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("rules", &self.rules)
            .finish()
    }
}
