use std::sync::Arc;

use crate::error::ContextError;
use crate::runtime::{provide_context, use_context};
use crate::store::{Store, Subscription};
use crate::user::record::{UserRecord, UserState};

/// Owner of the session state for one subtree.
///
/// Starts unauthenticated. The state is dropped with the provider.
///
/// # Examples
///
/// ```
/// use hearth::user::{use_user, UserProvider, UserRecord};
///
/// UserProvider::new().provide(|| {
///     let session = use_user();
///     session.set_user(UserRecord::new("1", "al", "s1").with_roles(["admin"]));
///     assert!(session.has_role("admin"));
///
///     session.logout();
///     assert!(!session.is_authenticated());
/// });
/// ```
#[derive(Clone)]
pub struct UserProvider {
    context: UserContext,
}

impl UserProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `children` with this provider's session in scope.
    pub fn provide<F, R>(&self, children: F) -> R
    where
        F: FnOnce() -> R,
    {
        provide_context(self.context.clone(), children)
    }

    /// The handle descendants receive from [`use_user`].
    pub fn context(&self) -> UserContext {
        self.context.clone()
    }
}

/// Session handle onto the nearest user provider.
///
/// Derived values are computed from the current snapshot on every call,
/// so they always agree with [`user`](Self::user).
#[derive(Clone)]
pub struct UserContext {
    store: Store<UserState>,
}

impl UserContext {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<UserRecord> {
        self.store.read(|state| state.user().cloned())
    }

    /// The current session snapshot.
    pub fn snapshot(&self) -> Arc<UserState> {
        self.store.get()
    }

    /// Replace the session user. `None` signs out.
    pub fn set_user(&self, user: impl Into<Option<UserRecord>>) {
        self.store.set(UserState::new(user.into()));
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.read(UserState::is_authenticated)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.store.read(|state| state.has_role(role))
    }

    /// Sign out. Does nothing, and notifies nobody, when already signed out.
    pub fn logout(&self) {
        self.store
            .replace_with(|state| state.is_authenticated().then(UserState::default));
    }

    /// Observe every session change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&UserState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Whether both handles come from the same provider.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Store::ptr_eq(&a.store, &b.store)
    }
}

impl Default for UserProvider {
    fn default() -> Self {
        tracing::debug!("user provider created");
        Self {
            context: UserContext::default(),
        }
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            store: Store::new(UserState::default()),
        }
    }
}

impl std::fmt::Debug for UserContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserContext")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

/// Resolve the nearest [`UserProvider`], or report that there is none.
pub fn try_use_user() -> Result<UserContext, ContextError> {
    use_context::<UserContext>().ok_or(ContextError::MissingProvider {
        accessor: "use_user",
        provider: "UserProvider",
    })
}

/// Resolve the nearest [`UserProvider`].
///
/// # Panics
///
/// Panics when called outside every `UserProvider`.
#[track_caller]
pub fn use_user() -> UserContext {
    match try_use_user() {
        Ok(context) => context,
        Err(err) => panic!("{err}"),
    }
}
