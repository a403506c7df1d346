//! Validation message store.

use serde::Serialize;

use crate::path::FieldRef;

/// Messages attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessages {
    pub field: FieldRef,
    pub messages: Vec<String>,
}

/// Ordered mapping from [`FieldRef`] to validation messages.
///
/// Fields keep the order in which they first received a message, and each
/// field keeps its messages in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    entries: Vec<FieldMessages>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message for a field.
    pub fn add(&mut self, field: &FieldRef, message: impl Into<String>) {
        self.entry(field).push(message.into());
    }

    /// Append several messages for a field.
    ///
    /// No entry is created when `messages` is empty.
    pub fn add_all<I>(&mut self, field: &FieldRef, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut messages = messages.into_iter().peekable();
        if messages.peek().is_some() {
            self.entry(field).extend(messages.map(Into::into));
        }
    }

    /// Remove all messages for one field.
    pub fn clear_field(&mut self, field: &FieldRef) {
        self.entries.retain(|e| &e.field != field);
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Messages for one field.
    pub fn messages_for(&self, field: &FieldRef) -> &[String] {
        self.entries
            .iter()
            .find(|e| &e.field == field)
            .map(|e| e.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Messages for every field whose owner is `owner`, including
    /// object-level messages on `owner` itself.
    pub fn messages_for_owner<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.field.owner() == owner)
            .flat_map(|e| e.messages.iter().map(String::as_str))
    }

    /// All messages, field by field.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|e| e.messages.iter().map(String::as_str))
    }

    /// Fields that currently have at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &FieldRef> {
        self.entries.iter().map(|e| &e.field)
    }

    pub fn has_messages(&self, field: &FieldRef) -> bool {
        !self.messages_for(field).is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copy of every entry, suitable for serialization.
    pub fn snapshot(&self) -> Vec<FieldMessages> {
        self.entries.clone()
    }

    fn entry(&mut self, field: &FieldRef) -> &mut Vec<String> {
        let idx = match self.entries.iter().position(|e| &e.field == field) {
            Some(idx) => idx,
            None => {
                self.entries.push(FieldMessages {
                    field: field.clone(),
                    messages: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].messages
    }
}
