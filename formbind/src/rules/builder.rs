//! Fluent builders for rule sets.

use std::future::Future;
use std::sync::Arc;

use futures::future::FutureExt;

use super::rule::{Check, Condition, Rule};
use super::set::{RuleSet, RuleSetKind};
use crate::error::RuleError;

/// Type alias for the value extractor of a `rule_for` chain.
type Accessor<M, V> = Arc<dyn Fn(&M) -> V + Send + Sync>;

/// Builder for a [`RuleSet`].
///
/// # Example
///
/// ```ignore
/// let rules = RuleSet::<Person>::builder("person")
///     .rule_for("Name", |p: &Person| p.name.clone())
///         .required("You must enter a name")
///         .max_length(50, "Name cannot be longer than 50 characters")
///     .rule_for("Age", |p: &Person| p.age)
///         .less_than(150, "Age cannot be greater than 150")
///     .build()?;
/// ```
pub struct RuleSetBuilder<M> {
    name: String,
    kind: RuleSetKind,
    rules: Vec<Rule<M>>,
    error: Option<RuleError>,
}

impl<M: 'static> RuleSetBuilder<M> {
    /// Create a builder for a synchronous rule set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RuleSetKind::Synchronous,
            rules: Vec::new(),
            error: None,
        }
    }

    /// Mark the set as asynchronous: it only runs on submit.
    pub fn asynchronous(mut self) -> Self {
        self.kind = RuleSetKind::Asynchronous;
        self
    }

    /// Start declaring rules for one property.
    ///
    /// `property` is the path failures are reported against, `accessor`
    /// extracts the value the rules check.
    pub fn rule_for<V, F>(self, property: impl Into<String>, accessor: F) -> RuleBuilder<M, V>
    where
        F: Fn(&M) -> V + Send + Sync + 'static,
    {
        let first = self.rules.len();
        RuleBuilder {
            set: self,
            property: property.into(),
            accessor: Arc::new(accessor),
            first,
        }
    }

    /// Finish the set.
    pub fn build(self) -> Result<RuleSet<M>, RuleError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(RuleSet {
            name: self.name,
            kind: self.kind,
            rules: self.rules,
        })
    }
}

/// Builder for the rules of a single property.
pub struct RuleBuilder<M, V> {
    set: RuleSetBuilder<M>,
    property: String,
    accessor: Accessor<M, V>,
    // Index of the first rule added by this chain.
    first: usize,
}

impl<M: 'static, V: 'static> RuleBuilder<M, V> {
    fn push(mut self, check: Check<M>, msg: String) -> Self {
        self.set.rules.push(Rule {
            property: self.property.clone(),
            message: msg,
            conditions: Vec::new(),
            check,
        });
        self
    }

    /// Add a custom synchronous rule.
    pub fn must<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let accessor = Arc::clone(&self.accessor);
        self.push(Check::Sync(Box::new(move |m: &M| f(&accessor(m)))), msg.into())
    }

    /// Add a custom asynchronous rule.
    ///
    /// The value is extracted when validation starts and moved into the
    /// future, so `f` receives it by value.
    pub fn must_async<F, Fut>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(V) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let accessor = Arc::clone(&self.accessor);
        self.push(
            Check::Async(Box::new(move |m: &M| f(accessor(m)).boxed())),
            msg.into(),
        )
    }

    /// Replace the message of the last rule in this chain.
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        if self.set.rules.len() > self.first
            && let Some(rule) = self.set.rules.last_mut()
        {
            rule.message = msg.into();
        }
        self
    }

    /// Only apply the rules declared so far in this chain when `cond` holds.
    pub fn when<F>(mut self, cond: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        let cond: Condition<M> = Arc::new(cond);
        for rule in &mut self.set.rules[self.first..] {
            rule.conditions.push(Arc::clone(&cond));
        }
        self
    }

    /// Inverse of [`when`](Self::when).
    pub fn unless<F>(self, cond: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.when(move |m: &M| !cond(m))
    }

    /// Continue with the next property.
    pub fn rule_for<V2, F>(self, property: impl Into<String>, accessor: F) -> RuleBuilder<M, V2>
    where
        F: Fn(&M) -> V2 + Send + Sync + 'static,
        V2: 'static,
    {
        self.set.rule_for(property, accessor)
    }

    /// Finish the set.
    pub fn build(self) -> Result<RuleSet<M>, RuleError> {
        self.set.build()
    }
}

// Built-in rules for String values
impl<M: 'static> RuleBuilder<M, String> {
    /// Require the value to be non-blank.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.must(|v: &String| !v.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.must(move |v: &String| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.must(move |v: &String| v.chars().count() <= max, msg)
    }

    /// Require a valid email address. Empty values pass; use `required()`.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.must(
            |v: &String| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    /// Require the value to match a regex pattern.
    ///
    /// An invalid pattern is reported by `build()`.
    pub fn pattern(mut self, pattern: &str, msg: impl Into<String>) -> Self {
        match regex::Regex::new(pattern) {
            Ok(re) => self.must(move |v: &String| re.is_match(v), msg),
            Err(e) => {
                if self.set.error.is_none() {
                    self.set.error = Some(RuleError::InvalidPattern {
                        property: self.property.clone(),
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    });
                }
                self
            }
        }
    }

    /// Require the value to equal another value.
    pub fn equals(self, other: impl Into<String>, msg: impl Into<String>) -> Self {
        let other = other.into();
        self.must(move |v: &String| v == &other, msg)
    }
}

// Built-in rules for ordered values
impl<M: 'static, V: PartialOrd + Send + Sync + 'static> RuleBuilder<M, V> {
    /// Require the value to be strictly less than `limit`.
    pub fn less_than(self, limit: V, msg: impl Into<String>) -> Self {
        self.must(move |v: &V| *v < limit, msg)
    }

    /// Require the value to be strictly greater than `limit`.
    pub fn greater_than(self, limit: V, msg: impl Into<String>) -> Self {
        self.must(move |v: &V| *v > limit, msg)
    }
}

// Built-in rules for values with a meaningful default
impl<M: 'static, V: Default + PartialEq + 'static> RuleBuilder<M, V> {
    /// Require the value to differ from `V::default()` (e.g. a non-zero age).
    pub fn not_default(self, msg: impl Into<String>) -> Self {
        self.must(|v: &V| *v != V::default(), msg)
    }
}

// Built-in rules for Option values
impl<M: 'static, T: 'static> RuleBuilder<M, Option<T>> {
    /// Require the value to be present.
    pub fn present(self, msg: impl Into<String>) -> Self {
        self.must(Option::is_some, msg)
    }
}
