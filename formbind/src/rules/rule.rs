//! Single validation rules.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;

/// Type alias for the condition attached with `.when()`.
pub(crate) type Condition<M> = Arc<dyn Fn(&M) -> bool + Send + Sync>;

/// Type alias for a synchronous check over the whole model.
pub(crate) type SyncCheck<M> = Box<dyn Fn(&M) -> bool + Send + Sync>;

/// Type alias for an asynchronous check.
///
/// The closure runs synchronously to extract what it needs from the model,
/// the returned future owns that data.
pub(crate) type AsyncCheck<M> = Box<dyn Fn(&M) -> BoxFuture<'static, bool> + Send + Sync>;

/// Whether a rule can be evaluated without suspending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleKind {
    Sync,
    Async,
}

pub(crate) enum Check<M> {
    Sync(SyncCheck<M>),
    Async(AsyncCheck<M>),
}

/// One validation rule bound to a property path of model `M`.
pub struct Rule<M> {
    pub(crate) property: String,
    pub(crate) message: String,
    pub(crate) conditions: Vec<Condition<M>>,
    pub(crate) check: Check<M>,
}

impl<M> Rule<M> {
    /// Property path the rule reports failures against.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Message reported when the rule fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> RuleKind {
        match self.check {
            Check::Sync(_) => RuleKind::Sync,
            Check::Async(_) => RuleKind::Async,
        }
    }

    pub fn is_async(&self) -> bool {
        self.kind() == RuleKind::Async
    }

    /// Check if the rule applies to the model (all `.when()` conditions hold).
    pub(crate) fn applies(&self, model: &M) -> bool {
        self.conditions.iter().all(|cond| cond(model))
    }

    pub(crate) fn failure(&self) -> Failure {
        Failure {
            property: self.property.clone(),
            message: self.message.clone(),
        }
    }
}

impl<M> std::fmt::Debug for Rule<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("property", &self.property)
            .field("message", &self.message)
            .field("kind", &self.kind())
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

/// A failed rule: the property path it was declared for and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub property: String,
    pub message: String,
}
