//! Field accessor capability for model graphs.
//!
//! Any type that can appear in a form model implements [`FieldAccess`]. The
//! resolver uses it to look up named fields and indexed entries without
//! runtime reflection. Structs usually get it through `#[derive(Model)]`;
//! scalars, options, boxes and the std collections are covered here.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ResolveError;

/// Result of looking up one step of a property path.
#[derive(Clone, Copy)]
pub enum Lookup<'a> {
    /// A present value that can be descended into.
    Value(&'a dyn FieldAccess),
    /// An absent value (`None`).
    Null,
}

impl<'a> Lookup<'a> {
    /// Check if the lookup produced an absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the present value, if any.
    pub fn value(self) -> Option<&'a dyn FieldAccess> {
        match self {
            Self::Value(v) => Some(v),
            Self::Null => None,
        }
    }
}

impl std::fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "Value({})", v.type_name()),
            Self::Null => write!(f, "Null"),
        }
    }
}

/// Named and indexed field lookup on a model node.
pub trait FieldAccess: Send + Sync {
    /// Type name reported in resolution errors.
    fn type_name(&self) -> &'static str;

    /// Look up a named field. `None` means the type has no such field.
    fn field(&self, name: &str) -> Option<Lookup<'_>> {
        let _ = name;
        None
    }

    /// Look up an entry by the raw text of an indexer token.
    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        Err(ResolveError::NotIndexable {
            key: key.to_string(),
            type_name: self.type_name(),
        })
    }

    /// View this value as the result of a lookup.
    ///
    /// Wrappers such as `Option<T>` override this to report `Null`.
    fn as_lookup(&self) -> Lookup<'_>
    where
        Self: Sized,
    {
        Lookup::Value(self)
    }
}

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldAccess for $ty {
                fn type_name(&self) -> &'static str {
                    std::any::type_name::<$ty>()
                }
            }
        )*
    };
}

impl_leaf!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

impl<T: FieldAccess> FieldAccess for Option<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn field(&self, name: &str) -> Option<Lookup<'_>> {
        self.as_ref().and_then(|v| v.field(name))
    }

    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        match self {
            Some(v) => v.index(key),
            None => Ok(Lookup::Null),
        }
    }

    fn as_lookup(&self) -> Lookup<'_> {
        match self {
            Some(v) => v.as_lookup(),
            None => Lookup::Null,
        }
    }
}

impl<T: FieldAccess> FieldAccess for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn field(&self, name: &str) -> Option<Lookup<'_>> {
        (**self).field(name)
    }

    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        (**self).index(key)
    }

    fn as_lookup(&self) -> Lookup<'_> {
        (**self).as_lookup()
    }
}

impl<T: FieldAccess> FieldAccess for Arc<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn field(&self, name: &str) -> Option<Lookup<'_>> {
        (**self).field(name)
    }

    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        (**self).index(key)
    }

    fn as_lookup(&self) -> Lookup<'_> {
        (**self).as_lookup()
    }
}

/// Parse an indexer key into the collection's key type.
fn parse_key<K: FromStr>(key: &str) -> Result<K, ResolveError>
where
    K::Err: std::fmt::Display,
{
    key.trim().parse::<K>().map_err(|e| ResolveError::KeyConversion {
        key: key.to_string(),
        expected: std::any::type_name::<K>(),
        reason: e.to_string(),
    })
}

impl<T: FieldAccess> FieldAccess for Vec<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        let i: usize = parse_key(key)?;
        self.get(i)
            .map(FieldAccess::as_lookup)
            .ok_or_else(|| ResolveError::IndexNotFound {
                key: key.to_string(),
                type_name: self.type_name(),
            })
    }
}

impl<K, V> FieldAccess for HashMap<K, V>
where
    K: FromStr + Eq + Hash + Send + Sync,
    K::Err: std::fmt::Display,
    V: FieldAccess,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        let k: K = parse_key(key)?;
        self.get(&k)
            .map(FieldAccess::as_lookup)
            .ok_or_else(|| ResolveError::IndexNotFound {
                key: key.to_string(),
                type_name: self.type_name(),
            })
    }
}

impl<K, V> FieldAccess for BTreeMap<K, V>
where
    K: FromStr + Ord + Send + Sync,
    K::Err: std::fmt::Display,
    V: FieldAccess,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn index(&self, key: &str) -> Result<Lookup<'_>, ResolveError> {
        let k: K = parse_key(key)?;
        self.get(&k)
            .map(FieldAccess::as_lookup)
            .ok_or_else(|| ResolveError::IndexNotFound {
                key: key.to_string(),
                type_name: self.type_name(),
            })
    }
}
