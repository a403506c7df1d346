//! Property path resolution.
//!
//! Turns a property path reported by a rule (`"Name"`, `"Address.City"`,
//! `"Items[2].Name"`) into the [`FieldRef`] that validation messages attach
//! to. A null intermediate value stops the walk early and yields a reference
//! to the last token that could be reached.

use log::trace;
use serde::Serialize;

use crate::access::{FieldAccess, Lookup};
use crate::error::ResolveError;

const SEPARATORS: [char; 2] = ['.', '['];

/// Identifies one field of a model graph.
///
/// The owning object is named by its path from the model root (`""` for the
/// root itself). Two references are equal when they have the same owner path
/// and field name.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRef {
    owner: String,
    owner_type: &'static str,
    field: String,
    indexed: bool,
}

impl FieldRef {
    /// Reference a field directly on the model root.
    pub fn root(field: impl Into<String>) -> Self {
        Self {
            owner: String::new(),
            owner_type: "",
            field: field.into(),
            indexed: false,
        }
    }

    /// Reference a field on the object found at `owner`.
    pub fn new(owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            owner_type: "",
            field: field.into(),
            indexed: false,
        }
    }

    /// Reference the object at `owner` as a whole (empty field name).
    ///
    /// Used for object-level messages and summaries.
    pub fn model(owner: impl Into<String>) -> Self {
        Self::new(owner, "")
    }

    /// Path of the owning object from the model root.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Type name of the owning object, when produced by [`resolve`].
    pub fn owner_type(&self) -> &'static str {
        self.owner_type
    }

    /// The field name on the owning object.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Whether the field was reached through an indexer (`[key]`).
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Whether this refers to an object as a whole rather than a field.
    pub fn is_model(&self) -> bool {
        self.field.is_empty()
    }

    /// Full path from the model root, in the same syntax rules report.
    pub fn path(&self) -> String {
        join(&self.owner, &self.field, self.indexed)
    }
}

impl PartialEq for FieldRef {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.field == other.field && self.indexed == other.indexed
    }
}

impl Eq for FieldRef {}

impl std::hash::Hash for FieldRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.field.hash(state);
        self.indexed.hash(state);
    }
}

impl std::fmt::Display for FieldRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

fn join(owner: &str, field: &str, indexed: bool) -> String {
    match (owner.is_empty(), indexed) {
        (_, true) => format!("{owner}[{field}]"),
        (true, false) => field.to_string(),
        (false, false) if field.is_empty() => owner.to_string(),
        (false, false) => format!("{owner}.{field}"),
    }
}

/// Resolve a property path against a model root.
///
/// Walks one token at a time. Plain tokens are looked up with
/// [`FieldAccess::field`], tokens ending in `]` with [`FieldAccess::index`].
/// When a non-terminal token yields `Null`, resolution stops and returns a
/// reference to that token on the current object.
///
/// The empty path names the root object as a whole, the same key
/// [`FieldRef::model("")`](FieldRef::model) builds.
pub fn resolve(root: &dyn FieldAccess, path: &str) -> Result<FieldRef, ResolveError> {
    if path.is_empty() {
        return Ok(FieldRef {
            owner: String::new(),
            owner_type: root.type_name(),
            field: String::new(),
            indexed: false,
        });
    }

    let mut current = root;
    let mut owner = String::new();
    let mut rest = path;

    loop {
        let Some(end) = rest.find(&SEPARATORS[..]) else {
            let (field, indexed) = match rest.strip_suffix(']') {
                Some(key) => (key, true),
                None => (rest, false),
            };
            if field.is_empty() {
                return Err(ResolveError::InvalidPath(path.to_string()));
            }
            trace!("resolved '{}' to '{}' on '{}'", path, field, owner);
            return Ok(FieldRef {
                owner,
                owner_type: current.type_name(),
                field: field.to_string(),
                indexed,
            });
        };

        let token = &rest[..end];
        let opens_indexer = rest[end..].starts_with('[');
        rest = &rest[end + 1..];

        let (name, indexed, lookup) = match token.strip_suffix(']') {
            Some(key) => (key, true, current.index(key)?),
            // `[0].Name`: an indexer applied to the root itself.
            None if token.is_empty() && opens_indexer && owner.is_empty() => continue,
            None if token.is_empty() => {
                return Err(ResolveError::InvalidPath(path.to_string()));
            }
            None => {
                let lookup = current
                    .field(token)
                    .ok_or_else(|| ResolveError::FieldNotFound {
                        field: token.to_string(),
                        type_name: current.type_name(),
                    })?;
                (token, false, lookup)
            }
        };

        match lookup {
            Lookup::Null => {
                trace!("'{}' stopped at null '{}' on '{}'", path, name, owner);
                return Ok(FieldRef {
                    owner,
                    owner_type: current.type_name(),
                    field: name.to_string(),
                    indexed,
                });
            }
            Lookup::Value(next) => {
                owner = join(&owner, name, indexed);
                current = next;
            }
        }
    }
}
