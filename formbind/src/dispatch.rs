//! Routes field changes to synchronous rule sets and submissions to
//! asynchronous ones.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::access::FieldAccess;
use crate::config::SubmitPolicy;
use crate::context::EditContext;
use crate::error::{FormError, ResolveError, ValidationError};
use crate::form::SubmitOutcome;
use crate::path::{self, FieldRef};
use crate::rules::{RuleSet, RuleSetProvider};
use crate::store::MessageStore;

/// Validation dispatcher for one edit context.
///
/// The field-change path never suspends. The submit path awaits each
/// asynchronous rule set in provider order. Submissions are serialized
/// according to the configured [`SubmitPolicy`].
pub struct ValidationDispatcher<M> {
    name: &'static str,
    context: EditContext<M>,
    provider: Arc<dyn RuleSetProvider<M>>,
    policy: SubmitPolicy,
    gate: Mutex<()>,
}

impl<M: FieldAccess + 'static> ValidationDispatcher<M> {
    pub fn new(context: EditContext<M>, provider: Arc<dyn RuleSetProvider<M>>) -> Self {
        Self {
            name: "Form",
            context,
            provider,
            policy: SubmitPolicy::default(),
            gate: Mutex::new(()),
        }
    }

    /// Set the form name used in errors and logs.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Set how overlapping submissions are handled.
    pub fn submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn context(&self) -> &EditContext<M> {
        &self.context
    }

    fn rule_sets(&self, asynchronous: bool) -> Vec<Arc<RuleSet<M>>> {
        self.provider
            .rule_sets()
            .into_iter()
            .filter(|s| s.is_async() == asynchronous)
            .collect()
    }

    /// Synchronous path: re-validate one field.
    ///
    /// Runs every synchronous rule set scoped to `field` and replaces that
    /// field's messages. If any selected set holds an async rule for the
    /// field, fails without touching the message store.
    pub fn on_field_changed(&self, field: &FieldRef) -> Result<(), ValidationError> {
        let property = field.path();
        let sets = self.rule_sets(false);

        for set in &sets {
            set.ensure_sync(&property)?;
        }

        let messages = self.context.model().with(|model| {
            let mut messages = Vec::new();
            for set in &sets {
                let failures = set.validate_field(model, &property)?;
                messages.extend(failures.into_iter().map(|f| f.message));
            }
            Ok::<_, ValidationError>(messages)
        })?;

        debug!(
            "{}: '{}' validated by {} rule set(s), {} message(s)",
            self.name,
            property,
            sets.len(),
            messages.len()
        );

        self.context.message_store().update(|store| {
            store.clear_field(field);
            store.add_all(field, messages);
        });
        self.context.notify_validation_state_changed();
        Ok(())
    }

    /// Asynchronous path: validate the whole model with every async rule set.
    ///
    /// Clears all messages first. Rule sets are awaited one after another
    /// and each failure is mapped back to a field by resolving its property
    /// path against the model. The outcome is decided before the submission
    /// gate is released, so a queued submission cannot change it.
    ///
    /// Validation-state-changed fires whether or not the pass succeeded; on
    /// error the store holds the messages of the sets that completed.
    pub async fn on_submit(&self) -> Result<SubmitOutcome, FormError> {
        let _guard = match self.policy {
            SubmitPolicy::Reject => self.gate.try_lock().map_err(|_| {
                warn!("{}: submit rejected, a submission is in flight", self.name);
                FormError::SubmissionInProgress(self.name)
            })?,
            SubmitPolicy::Queue => self.gate.lock().await,
        };

        let sets = self.rule_sets(true);
        self.context.message_store().update(MessageStore::clear);

        let result = self.run_async_sets(&sets).await.map(|()| {
            if self.context.is_valid() {
                SubmitOutcome::Valid
            } else {
                SubmitOutcome::Invalid
            }
        });
        match &result {
            Ok(outcome) => debug!(
                "{}: submit ran {} rule set(s), {:?}",
                self.name,
                sets.len(),
                outcome
            ),
            Err(e) => warn!("{}: submit failed: {}", self.name, e),
        }

        self.context.notify_validation_state_changed();
        result
    }

    async fn run_async_sets(&self, sets: &[Arc<RuleSet<M>>]) -> Result<(), FormError> {
        for set in sets {
            let pending = self.context.model().with(|model| set.validate_async(model));
            let failures = pending.await;

            let resolved = self.context.model().with(|model| {
                failures
                    .into_iter()
                    .map(|f| Ok((path::resolve(model, &f.property)?, f.message)))
                    .collect::<Result<Vec<_>, ResolveError>>()
            })?;

            self.context.message_store().update(|store| {
                for (field, message) in resolved {
                    store.add(&field, message);
                }
            });
        }
        Ok(())
    }
}

impl<M> std::fmt::Debug for ValidationDispatcher<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationDispatcher")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
