//! Edit context: the model being edited, its messages and change notifications.

use std::sync::Arc;

use log::debug;

use crate::access::FieldAccess;
use crate::error::{FormError, ResolveError};
use crate::path::{self, FieldRef};
use crate::state::State;
use crate::store::MessageStore;
use crate::subscription::{Subscribers, Subscription};

/// Handler invoked when a field of the model changes.
pub type FieldChangedHandler = dyn Fn(&FieldRef) -> Result<(), FormError> + Send + Sync;

/// Handler invoked when the validation messages change.
pub type StateChangedHandler = dyn Fn() + Send + Sync;

/// Shared state of one form-editing session.
///
/// Cloning an `EditContext` yields another handle to the same model,
/// message store and subscriber lists.
pub struct EditContext<M> {
    model: State<M>,
    messages: State<MessageStore>,
    field_changed: Subscribers<FieldChangedHandler>,
    state_changed: Subscribers<StateChangedHandler>,
}

impl<M: FieldAccess + 'static> EditContext<M> {
    /// Create a context for a new model.
    pub fn new(model: M) -> Self {
        Self::from_state(State::new(model))
    }

    /// Create a context around an existing model handle.
    pub fn from_state(model: State<M>) -> Self {
        Self {
            model,
            messages: State::new(MessageStore::new()),
            field_changed: Subscribers::new(),
            state_changed: Subscribers::new(),
        }
    }

    pub fn model(&self) -> &State<M> {
        &self.model
    }

    pub fn message_store(&self) -> &State<MessageStore> {
        &self.messages
    }

    /// Resolve a property path against the current model.
    pub fn field(&self, path: &str) -> Result<FieldRef, ResolveError> {
        self.model.with(|m| path::resolve(m, path))
    }

    /// Subscribe to field-change notifications.
    pub fn subscribe_field_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&FieldRef) -> Result<(), FormError> + Send + Sync + 'static,
    {
        self.field_changed.subscribe(Arc::new(handler))
    }

    /// Subscribe to validation-state-changed notifications.
    pub fn subscribe_validation_state_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.state_changed.subscribe(Arc::new(handler))
    }

    /// Notify subscribers that `field` changed.
    ///
    /// Handlers run in subscription order; the first error stops the
    /// notification and is returned.
    pub fn notify_field_changed(&self, field: &FieldRef) -> Result<(), FormError> {
        debug!("field changed: {}", field);
        for handler in self.field_changed.handlers() {
            handler(field)?;
        }
        Ok(())
    }

    /// Notify subscribers that validation messages changed.
    pub fn notify_validation_state_changed(&self) {
        for handler in self.state_changed.handlers() {
            handler();
        }
    }

    /// Apply `mutate` to the model, then notify that `path` changed.
    ///
    /// The path is resolved after the mutation, so it may point into
    /// objects the mutation just created.
    pub fn edit<F>(&self, path: &str, mutate: F) -> Result<FieldRef, FormError>
    where
        F: FnOnce(&mut M),
    {
        self.model.update(mutate);
        let field = self.field(path)?;
        self.notify_field_changed(&field)?;
        Ok(field)
    }

    /// Whether the model was changed since creation or the last
    /// [`mark_as_unmodified`](Self::mark_as_unmodified).
    pub fn is_modified(&self) -> bool {
        self.model.is_dirty()
    }

    pub fn mark_as_unmodified(&self) {
        self.model.clear_dirty();
    }

    /// All current validation messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .with(|s| s.messages().map(str::to_string).collect())
    }

    /// Validation messages for one field.
    pub fn messages_for(&self, field: &FieldRef) -> Vec<String> {
        self.messages.with(|s| s.messages_for(field).to_vec())
    }

    /// Validation messages for every field of the object at `owner`.
    pub fn messages_for_owner(&self, owner: &str) -> Vec<String> {
        self.messages
            .with(|s| s.messages_for_owner(owner).map(str::to_string).collect())
    }

    /// Check if there are no validation messages.
    pub fn is_valid(&self) -> bool {
        self.messages.with(MessageStore::is_empty)
    }

    /// Check if two handles refer to the same session.
    pub fn same_session(&self, other: &Self) -> bool {
        self.model.ptr_eq(&other.model)
    }

    /// Number of active field-change subscriptions.
    pub fn field_changed_subscribers(&self) -> usize {
        self.field_changed.len()
    }
}

impl<M> Clone for EditContext<M> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            messages: self.messages.clone(),
            field_changed: self.field_changed.clone(),
            state_changed: self.state_changed.clone(),
        }
    }
}

impl<M> std::fmt::Debug for EditContext<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditContext")
            .field("model", &std::any::type_name::<M>())
            .finish_non_exhaustive()
    }
}
