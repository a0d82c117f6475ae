use std::any::type_name;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// State that changes only through named actions.
///
/// `reduce` is pure: it returns the next state, or `None` when the action
/// leaves the state untouched. A `None` keeps the current snapshot and
/// suppresses notification.
pub trait Reducer: Sized {
    type Action;

    fn reduce(&self, action: &Self::Action) -> Option<Self>;
}

/// Snapshots committed but not yet delivered, oldest first.
struct Pending<T> {
    queue: VecDeque<Arc<T>>,
    draining: bool,
}

struct Shared<T> {
    state: RwLock<Arc<T>>,
    // Held across read-compute-write so commits never interleave
    mutation: Mutex<()>,
    pending: Mutex<Pending<T>>,
    subscribers: RwLock<Vec<(usize, Subscriber<T>)>>,
    next_id: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Shared<T> {
    fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Atomically derive the next state from the current one.
    ///
    /// `next` returning `None` leaves the snapshot untouched. Returns whether
    /// a new snapshot was installed.
    fn commit<F>(&self, derive: F) -> bool
    where
        F: FnOnce(&T) -> Option<T>,
    {
        {
            let _mutation = lock(&self.mutation);
            let current = self.snapshot();
            let Some(next) = derive(&*current) else {
                tracing::trace!(store = type_name::<T>(), "state unchanged");
                return false;
            };
            let next = Arc::new(next);
            *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
            lock(&self.pending).queue.push_back(next);
            tracing::debug!(store = type_name::<T>(), "state replaced");
        }
        self.drain();
        true
    }

    /// Deliver queued snapshots in commit order.
    ///
    /// Only one caller drains at a time. A commit made while a drain is in
    /// progress (from a subscriber, or another thread) is queued and
    /// delivered by the active drain once the current pass finishes.
    fn drain(&self) {
        {
            let mut pending = lock(&self.pending);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }
        let _reset = DrainGuard(&self.pending);

        loop {
            let snapshot = {
                let mut pending = lock(&self.pending);
                match pending.queue.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        pending.draining = false;
                        return;
                    }
                }
            };
            self.notify(&snapshot);
        }
    }

    /// Call every subscriber with `snapshot`, in subscription order.
    ///
    /// The subscriber list is copied first so no lock is held while
    /// callbacks run.
    fn notify(&self, snapshot: &T) {
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        for subscriber in subscribers {
            subscriber(snapshot);
        }
    }
}

/// Releases the drain flag if a subscriber panics mid-delivery.
struct DrainGuard<'a, T>(&'a Mutex<Pending<T>>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(self.0).draining = false;
        }
    }
}

impl<T: Reducer> Shared<T> {
    fn apply(&self, action: &T::Action) -> bool {
        self.commit(|current| current.reduce(action))
    }
}

trait Detach: Send + Sync {
    fn detach(&self, id: usize);
}

impl<T: Send + Sync> Detach for Shared<T> {
    fn detach(&self, id: usize) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(subscriber_id, _)| *subscriber_id != id);
    }
}

/// A store holding immutable snapshots of application state.
///
/// Every mutation installs a fresh `Arc<T>`; readers never observe a
/// snapshot changing underneath them. Clones share the same state.
///
/// Mutations are serialized: each one reads the snapshot the previous one
/// installed, and subscribers receive snapshots in the order they were
/// committed, including commits made from inside a subscriber.
///
/// # Examples
///
/// ```
/// use hearth::Store;
///
/// let store = Store::new(1);
/// let before = store.get();
///
/// store.set(2);
///
/// assert_eq!(*before, 1);
/// assert_eq!(*store.get(), 2);
/// ```
pub struct Store<T> {
    inner: Arc<Shared<T>>,
}

impl<T: Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Shared {
                state: RwLock::new(Arc::new(initial)),
                mutation: Mutex::new(()),
                pending: Mutex::new(Pending {
                    queue: VecDeque::new(),
                    draining: false,
                }),
                subscribers: RwLock::new(Vec::new()),
                next_id: AtomicUsize::new(0),
            }),
        }
    }

    /// Get the current snapshot.
    pub fn get(&self) -> Arc<T> {
        self.inner.snapshot()
    }

    /// Read the current snapshot with a function.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let snapshot = self.inner.snapshot();
        f(&*snapshot)
    }

    /// Replace the state and notify subscribers.
    pub fn set(&self, next: T) {
        self.inner.commit(|_| Some(next));
    }

    /// Derive the next state from a copy of the current one.
    pub fn update<F>(&self, f: F)
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        self.inner.commit(|current| {
            let mut next = current.clone();
            f(&mut next);
            Some(next)
        });
    }

    /// Replace the state only if `f` returns a new one.
    ///
    /// The check and the write happen under the store's mutation lock.
    /// Returns whether a new snapshot was installed.
    pub fn replace_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> Option<T>,
    {
        self.inner.commit(f)
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every effective mutation until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        tracing::trace!(subscriber = id, "subscribed");

        let inner: Arc<dyn Detach> = self.inner.clone();
        Subscription {
            id,
            store: Arc::downgrade(&inner),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether both handles refer to the same store.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<T: Reducer + Send + Sync + 'static> Store<T> {
    /// Run `action` through the reducer.
    ///
    /// Returns whether a new snapshot was installed.
    pub fn dispatch(&self, action: &T::Action) -> bool {
        self.inner.apply(action)
    }

    /// A mutation entry point bound to this store.
    ///
    /// Every `Dispatch` taken from the same store compares equal under
    /// [`Dispatch::ptr_eq`].
    pub fn dispatcher(&self) -> Dispatch<T::Action>
    where
        T::Action: 'static,
    {
        let target: Arc<dyn DispatchTarget<T::Action>> = self.inner.clone();
        Dispatch { target }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

trait DispatchTarget<A>: Send + Sync {
    fn dispatch(&self, action: &A) -> bool;
}

impl<T> DispatchTarget<T::Action> for Shared<T>
where
    T: Reducer + Send + Sync,
{
    fn dispatch(&self, action: &T::Action) -> bool {
        self.apply(action)
    }
}

/// Cloneable handle that feeds actions to a reducer store.
pub struct Dispatch<A> {
    target: Arc<dyn DispatchTarget<A>>,
}

impl<A> Dispatch<A> {
    /// Send an action to the store.
    pub fn dispatch(&self, action: A) {
        self.target.dispatch(&action);
    }

    /// Whether both handles feed the same store.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.target, &b.target)
    }
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
        }
    }
}

impl<A> std::fmt::Debug for Dispatch<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch").finish_non_exhaustive()
    }
}

/// RAII guard for a store subscription.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: usize,
    store: Weak<dyn Detach>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.detach(self.id);
        }
    }
}
