//! Validated form sessions.
//!
//! A [`ValidatedForm`] ties an [`EditContext`] to a rule set provider: it
//! subscribes a [`ValidationDispatcher`] to the context's field changes for
//! as long as the form lives, and drives the submit path.
//!
//! # Example
//!
//! ```ignore
//! let form = ValidatedForm::new(
//!     FormSource::Model(Person::default()),
//!     registry,
//!     FormConfig::new("person").on_valid_submit(|cx| save(cx)),
//! );
//!
//! form.edit("Name", |p| p.name = "alice".into())?;
//! match form.submit().await? {
//!     SubmitOutcome::Valid => {}
//!     SubmitOutcome::Invalid => show(form.summary()),
//! }
//! ```

use std::sync::Arc;

use log::debug;

use crate::access::FieldAccess;
use crate::config::FormConfig;
use crate::context::EditContext;
use crate::dispatch::ValidationDispatcher;
use crate::error::FormError;
use crate::path::FieldRef;
use crate::rules::RuleSetProvider;
use crate::subscription::Subscription;
use crate::summary::ValidationSummary;

/// Where a form gets its edit context from.
///
/// A form is given either a model, for which it creates a context, or an
/// existing context. Never both.
pub enum FormSource<M> {
    Model(M),
    Context(EditContext<M>),
}

impl<M: FieldAccess + 'static> FormSource<M> {
    fn into_context(self) -> EditContext<M> {
        match self {
            Self::Model(model) => EditContext::new(model),
            Self::Context(cx) => cx,
        }
    }
}

/// Result of a completed submission, decided while the submission still
/// held the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The pass left no validation messages.
    Valid,
    /// The pass left at least one message.
    Invalid,
}

impl SubmitOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A form session with field-level and submit-time validation.
pub struct ValidatedForm<M> {
    config: FormConfig<M>,
    provider: Arc<dyn RuleSetProvider<M>>,
    dispatcher: Arc<ValidationDispatcher<M>>,
    // Dropping this detaches the dispatcher from the context.
    subscription: Subscription,
}

impl<M: FieldAccess + 'static> ValidatedForm<M> {
    /// Create a form over `source`, validated by `provider`.
    pub fn new<P>(source: FormSource<M>, provider: P, config: FormConfig<M>) -> Self
    where
        P: RuleSetProvider<M> + 'static,
    {
        Self::with_provider(source, Arc::new(provider), config)
    }

    /// Create a form with a shared provider.
    pub fn with_provider(
        source: FormSource<M>,
        provider: Arc<dyn RuleSetProvider<M>>,
        config: FormConfig<M>,
    ) -> Self {
        let (dispatcher, subscription) =
            Self::attach(source.into_context(), Arc::clone(&provider), &config);
        Self {
            config,
            provider,
            dispatcher,
            subscription,
        }
    }

    fn attach(
        context: EditContext<M>,
        provider: Arc<dyn RuleSetProvider<M>>,
        config: &FormConfig<M>,
    ) -> (Arc<ValidationDispatcher<M>>, Subscription) {
        let dispatcher = Arc::new(
            ValidationDispatcher::new(context, provider)
                .name(config.name)
                .submit_policy(config.submit_policy),
        );

        let weak = Arc::downgrade(&dispatcher);
        let subscription = dispatcher.context().subscribe_field_changed(move |field| {
            match weak.upgrade() {
                Some(dispatcher) => Ok(dispatcher.on_field_changed(field)?),
                None => Ok(()),
            }
        });

        debug!("{}: attached to edit context ({})", config.name, subscription.id());
        (dispatcher, subscription)
    }

    pub fn config(&self) -> &FormConfig<M> {
        &self.config
    }

    pub fn context(&self) -> &EditContext<M> {
        self.dispatcher.context()
    }

    pub fn dispatcher(&self) -> &ValidationDispatcher<M> {
        &self.dispatcher
    }

    /// Whether the form is currently attached to its context.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    /// Replace the model. The old context, its messages and its
    /// subscription are discarded.
    pub fn set_model(&mut self, model: M) {
        self.set_context(EditContext::new(model));
    }

    /// Switch to another edit context. No-op if it is the current session.
    pub fn set_context(&mut self, context: EditContext<M>) {
        if context.same_session(self.context()) {
            return;
        }
        let (dispatcher, subscription) =
            Self::attach(context, Arc::clone(&self.provider), &self.config);
        self.dispatcher = dispatcher;
        self.subscription = subscription;
    }

    /// Edit the model and run field-level validation for `path`.
    pub fn edit<F>(&self, path: &str, mutate: F) -> Result<FieldRef, FormError>
    where
        F: FnOnce(&mut M),
    {
        self.context().edit(path, mutate)
    }

    /// Run submit-time validation, then the valid or invalid callback.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let outcome = self.dispatcher.on_submit().await?;

        let callback = match outcome {
            SubmitOutcome::Valid => &self.config.on_valid_submit,
            SubmitOutcome::Invalid => &self.config.on_invalid_submit,
        };
        debug!("{}: submit finished {:?}", self.config.name, outcome);
        if let Some(callback) = callback {
            callback(self.context());
        }
        Ok(outcome)
    }

    /// Summary of every message in the form.
    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary::for_context(self.context())
    }
}

impl<M> std::fmt::Debug for ValidatedForm<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedForm")
            .field("config", &self.config)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
