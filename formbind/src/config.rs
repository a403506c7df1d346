//! Form configuration types.

use std::sync::Arc;

use crate::context::EditContext;

/// Callback invoked after a submission has been validated.
pub type SubmitCallback<M> = Arc<dyn Fn(&EditContext<M>) + Send + Sync>;

/// Per-form configuration.
pub struct FormConfig<M> {
    /// Display name used in logs and errors.
    pub name: &'static str,

    /// Behavior when a submission starts while another is running.
    pub submit_policy: SubmitPolicy,

    /// Invoked when a submission leaves no validation messages.
    pub on_valid_submit: Option<SubmitCallback<M>>,

    /// Invoked when a submission leaves at least one validation message.
    pub on_invalid_submit: Option<SubmitCallback<M>>,
}

impl<M> Default for FormConfig<M> {
    fn default() -> Self {
        Self {
            name: "Form",
            submit_policy: SubmitPolicy::default(),
            on_valid_submit: None,
            on_invalid_submit: None,
        }
    }
}

impl<M> FormConfig<M> {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the submit policy.
    pub fn submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }

    /// Queue overlapping submissions instead of rejecting them.
    pub fn queue_submissions(mut self) -> Self {
        self.submit_policy = SubmitPolicy::Queue;
        self
    }

    /// Set the callback for valid submissions.
    pub fn on_valid_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&EditContext<M>) + Send + Sync + 'static,
    {
        self.on_valid_submit = Some(Arc::new(f));
        self
    }

    /// Set the callback for invalid submissions.
    pub fn on_invalid_submit<F>(mut self, f: F) -> Self
    where
        F: Fn(&EditContext<M>) + Send + Sync + 'static,
    {
        self.on_invalid_submit = Some(Arc::new(f));
        self
    }
}

impl<M> Clone for FormConfig<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            submit_policy: self.submit_policy,
            on_valid_submit: self.on_valid_submit.clone(),
            on_invalid_submit: self.on_invalid_submit.clone(),
        }
    }
}

impl<M> std::fmt::Debug for FormConfig<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormConfig")
            .field("name", &self.name)
            .field("submit_policy", &self.submit_policy)
            .field("on_valid_submit", &self.on_valid_submit.is_some())
            .field("on_invalid_submit", &self.on_invalid_submit.is_some())
            .finish()
    }
}

/// Behavior when `submit` is called while a submission is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Fail the new submission with `FormError::SubmissionInProgress`.
    #[default]
    Reject,

    /// Wait for the running submission, then run.
    Queue,
}
