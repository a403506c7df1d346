//! Error types for path resolution, rule dispatch and form submission.

use thiserror::Error;

/// Errors raised while walking a property path through a model graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A plain path token does not name a field of the current object.
    #[error("Could not find field named '{field}' on object of type '{type_name}'")]
    FieldNotFound {
        /// The token that failed to resolve.
        field: String,
        /// Type name of the object that was searched.
        type_name: &'static str,
    },

    /// An indexer token could not be converted to the indexer's key type.
    #[error("Could not convert indexer key '{key}' to '{expected}': {reason}")]
    KeyConversion {
        /// The raw key text.
        key: String,
        /// Type name of the expected key.
        expected: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The indexer key was well formed but nothing is stored under it.
    #[error("No entry at index '{key}' on object of type '{type_name}'")]
    IndexNotFound {
        /// The raw key text.
        key: String,
        /// Type name of the indexed object.
        type_name: &'static str,
    },

    /// An indexer token was applied to an object without an indexer.
    #[error("Object of type '{type_name}' does not support indexing (key '{key}')")]
    NotIndexable {
        /// The raw key text.
        key: String,
        /// Type name of the object.
        type_name: &'static str,
    },

    /// The path contained an empty token (`a..b`, `a.`, `a[]`).
    #[error("Invalid property path '{0}'")]
    InvalidPath(String),
}

/// Errors raised by the validation dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A rule requiring `.await` was reached from the synchronous field-change path.
    #[error("Rule set '{rule_set}' has an async rule for '{property}' on the synchronous path")]
    AsyncOnSyncPath {
        /// Name of the offending rule set.
        rule_set: String,
        /// Property path the async rule is declared for.
        property: String,
    },
}

/// Errors raised while building a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A `pattern` rule was given an invalid regular expression.
    #[error("Invalid pattern '{pattern}' for '{property}': {reason}")]
    InvalidPattern {
        /// Property path the rule was declared for.
        property: String,
        /// The pattern source.
        pattern: String,
        /// Regex compiler message.
        reason: String,
    },
}

/// Top-level error for form sessions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Another submission of the same form is still running.
    #[error("Form '{0}' is already submitting")]
    SubmissionInProgress(&'static str),
}
