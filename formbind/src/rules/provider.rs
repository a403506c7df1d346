//! Rule set providers and inventory-based registration.

use std::any::{Any, TypeId};
use std::sync::Arc;

use log::{debug, warn};

use super::set::RuleSet;
use crate::error::RuleError;

/// Supplies the rule sets for model type `M`, in evaluation order.
pub trait RuleSetProvider<M>: Send + Sync {
    fn rule_sets(&self) -> Vec<Arc<RuleSet<M>>>;
}

impl<M, P: RuleSetProvider<M> + ?Sized> RuleSetProvider<M> for Arc<P> {
    fn rule_sets(&self) -> Vec<Arc<RuleSet<M>>> {
        (**self).rule_sets()
    }
}

/// Explicitly populated provider. Sets are returned in registration order.
pub struct RuleSetRegistry<M> {
    sets: Vec<Arc<RuleSet<M>>>,
}

impl<M> RuleSetRegistry<M> {
    pub fn new() -> Self {
        Self { sets: Vec::new() }
    }

    /// Add a rule set (builder style).
    pub fn with(mut self, set: RuleSet<M>) -> Self {
        self.register(set);
        self
    }

    pub fn register(&mut self, set: RuleSet<M>) {
        debug!("registered rule set '{}' ({:?})", set.name(), set.kind());
        self.sets.push(Arc::new(set));
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<M> Default for RuleSetRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> RuleSetProvider<M> for RuleSetRegistry<M> {
    fn rule_sets(&self) -> Vec<Arc<RuleSet<M>>> {
        self.sets.clone()
    }
}

/// Rule set registration entry for inventory.
///
/// Created by [`register_rule_set!`](crate::register_rule_set).
pub struct RuleSetRegistration {
    /// Name of the factory function.
    pub name: &'static str,
    /// Type id of the model the set validates.
    pub model: fn() -> TypeId,
    /// Factory producing a boxed `Result<RuleSet<M>, RuleError>`.
    pub factory: fn() -> Box<dyn Any + Send + Sync>,
}

impl RuleSetRegistration {
    /// Create a new rule set registration.
    pub const fn new(
        name: &'static str,
        model: fn() -> TypeId,
        factory: fn() -> Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            name,
            model,
            factory,
        }
    }
}

inventory::collect!(RuleSetRegistration);

/// Get all registered rule sets, for every model type.
pub fn registered_rule_sets() -> impl Iterator<Item = &'static RuleSetRegistration> {
    inventory::iter::<RuleSetRegistration>()
}

/// Register a rule set factory for a model type at link time.
///
/// The factory must be a `fn() -> Result<RuleSet<Model>, RuleError>`.
///
/// ```ignore
/// fn person_rules() -> Result<RuleSet<Person>, RuleError> { ... }
/// register_rule_set!(Person, person_rules);
/// ```
#[macro_export]
macro_rules! register_rule_set {
    ($model:ty, $factory:path) => {
        const _: () = {
            fn __formbind_factory() -> ::std::boxed::Box<dyn ::std::any::Any + Send + Sync> {
                let set: ::std::result::Result<
                    $crate::rules::RuleSet<$model>,
                    $crate::error::RuleError,
                > = $factory();
                ::std::boxed::Box::new(set)
            }

            $crate::inventory::submit! {
                $crate::rules::RuleSetRegistration::new(
                    stringify!($factory),
                    ::std::any::TypeId::of::<$model>,
                    __formbind_factory,
                )
            }
        };
    };
}

/// Provider over every rule set registered with
/// [`register_rule_set!`](crate::register_rule_set) for model `M`.
///
/// Factories run once, in [`InventoryProvider::new`]. Sets are ordered by
/// factory name so evaluation order does not depend on link order.
pub struct InventoryProvider<M> {
    sets: Vec<Arc<RuleSet<M>>>,
}

impl<M: 'static> InventoryProvider<M> {
    pub fn new() -> Result<Self, RuleError> {
        let mut entries: Vec<&'static RuleSetRegistration> = registered_rule_sets()
            .filter(|r| (r.model)() == TypeId::of::<M>())
            .collect();
        entries.sort_by_key(|r| r.name);

        let mut sets = Vec::with_capacity(entries.len());
        for entry in entries {
            match (entry.factory)().downcast::<Result<RuleSet<M>, RuleError>>() {
                Ok(set) => {
                    let set = (*set)?;
                    debug!("loaded rule set '{}' from '{}'", set.name(), entry.name);
                    sets.push(Arc::new(set));
                }
                Err(_) => warn!("rule set factory '{}' returned an unexpected type", entry.name),
            }
        }
        Ok(Self { sets })
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<M> RuleSetProvider<M> for InventoryProvider<M> {
    fn rule_sets(&self) -> Vec<Arc<RuleSet<M>>> {
        self.sets.clone()
    }
}
