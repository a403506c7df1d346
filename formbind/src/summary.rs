//! Templated validation summaries.

use crate::access::FieldAccess;
use crate::context::EditContext;
use crate::path::FieldRef;

/// Snapshot of validation messages for a form, or for one object in it.
///
/// # Example
///
/// ```ignore
/// let text = ValidationSummary::for_context(form.context())
///     .render(|messages| messages.join("\n"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    messages: Vec<String>,
}

impl ValidationSummary {
    /// Every message in the context.
    pub fn for_context<M: FieldAccess + 'static>(context: &EditContext<M>) -> Self {
        Self {
            messages: context.messages(),
        }
    }

    /// Messages for the object at `owner` (`""` is the model root): its
    /// object-level messages plus those of every field directly on it.
    pub fn for_owner<M: FieldAccess + 'static>(context: &EditContext<M>, owner: &str) -> Self {
        Self {
            messages: context.messages_for_owner(owner),
        }
    }

    /// Object-level messages on `owner` only, keyed by
    /// [`FieldRef::model`].
    pub fn for_model<M: FieldAccess + 'static>(context: &EditContext<M>, owner: &str) -> Self {
        Self {
            messages: context.messages_for(&FieldRef::model(owner)),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render the messages through a caller-supplied template.
    pub fn render<R>(&self, template: impl FnOnce(&[String]) -> R) -> R {
        template(&self.messages)
    }
}

impl std::fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for message in &self.messages {
            writeln!(f, "- {message}")?;
        }
        Ok(())
    }
}
