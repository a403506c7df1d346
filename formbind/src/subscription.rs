//! Subscriber lists with scoped unsubscription.
//!
//! Subscribing returns a [`Subscription`] guard. Dropping the guard removes
//! the handler, so a form session detaches from its edit context exactly
//! when the session ends.

use std::sync::{Arc, Mutex, Weak};

use uuid::Uuid;

/// Unique identifier for a subscription.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Entries<H> = Mutex<Vec<(SubscriptionId, Arc<H>)>>;

trait Detach: Send + Sync {
    fn detach(&self, id: SubscriptionId) -> bool;
    fn contains(&self, id: SubscriptionId) -> bool;
}

impl<H: ?Sized + Send + Sync> Detach for Entries<H> {
    fn detach(&self, id: SubscriptionId) -> bool {
        let mut guard = match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = guard.len();
        guard.retain(|(sid, _)| *sid != id);
        guard.len() != before
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        match self.lock() {
            Ok(guard) => guard.iter().any(|(sid, _)| *sid == id),
            Err(poisoned) => poisoned.into_inner().iter().any(|(sid, _)| *sid == id),
        }
    }
}

/// Ordered list of handlers of type `H`.
pub(crate) struct Subscribers<H: ?Sized> {
    inner: Arc<Entries<H>>,
}

impl<H: ?Sized + Send + Sync + 'static> Subscribers<H> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a handler. It stays subscribed until the guard is dropped.
    pub(crate) fn subscribe(&self, handler: Arc<H>) -> Subscription {
        let id = SubscriptionId::new();
        self.lock().push((id, handler));
        let list: Weak<dyn Detach> = Arc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription {
            id,
            list: Some(list),
        }
    }

    /// Handlers in subscription order.
    ///
    /// Returns a copy so handlers may subscribe or unsubscribe while the
    /// caller iterates.
    pub(crate) fn handlers(&self) -> Vec<Arc<H>> {
        self.lock().iter().map(|(_, h)| Arc::clone(h)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Arc<H>)>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<H: ?Sized> Clone for Subscribers<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Guard for an active subscription. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes the handler"]
pub struct Subscription {
    id: SubscriptionId,
    list: Option<Weak<dyn Detach>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Check if the handler is still attached to a live subscriber list.
    pub fn is_active(&self) -> bool {
        self.list
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|list| list.contains(self.id))
    }

    /// Unsubscribe now.
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(list) = self.list.take().and_then(|w| w.upgrade()) {
            list.detach(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
