use std::sync::Arc;

use crate::error::ContextError;
use crate::runtime::{provide_context, use_context};
use crate::store::{Dispatch, Store, Subscription};
use crate::theme::state::{Theme, ThemeAction, ThemeState};

/// Owner of a theme store for one subtree.
///
/// The store lives as long as the provider; every [`provide`](Self::provide)
/// call on the same provider exposes the same state, the way repeated
/// renders of one mounted component would.
///
/// # Examples
///
/// ```
/// use hearth::theme::{use_theme, Theme, ThemeAction, ThemeProvider};
///
/// let provider = ThemeProvider::new();
/// provider.provide(|| {
///     let theme = use_theme();
///     theme.dispatch().dispatch(ThemeAction::SetTheme(Theme::Dark));
///     assert_eq!(theme.state().current_theme, Theme::Dark);
/// });
/// ```
#[derive(Clone)]
pub struct ThemeProvider {
    context: ThemeContext,
}

impl ThemeProvider {
    /// Create a provider holding the default theme state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `children` with this provider's theme in scope.
    pub fn provide<F, R>(&self, children: F) -> R
    where
        F: FnOnce() -> R,
    {
        provide_context(self.context.clone(), children)
    }

    /// The handle descendants receive from [`use_theme`].
    pub fn context(&self) -> ThemeContext {
        self.context.clone()
    }
}

/// Read/dispatch handle onto the nearest theme provider.
#[derive(Clone)]
pub struct ThemeContext {
    store: Store<ThemeState>,
    dispatch: Dispatch<ThemeAction>,
}

impl ThemeContext {
    fn new(initial: ThemeState) -> Self {
        let store = Store::new(initial);
        let dispatch = store.dispatcher();
        Self { store, dispatch }
    }

    /// The current theme snapshot.
    pub fn state(&self) -> Arc<ThemeState> {
        self.store.get()
    }

    /// The provider's mutation entry point.
    ///
    /// Identity is fixed for the provider's lifetime.
    pub fn dispatch(&self) -> Dispatch<ThemeAction> {
        self.dispatch.clone()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.dispatch.dispatch(ThemeAction::SetTheme(theme));
    }

    pub fn set_primary_color(&self, color: impl Into<String>) {
        self.dispatch.dispatch(ThemeAction::SetPrimaryColor(color.into()));
    }

    pub fn set_background_color(&self, color: impl Into<String>) {
        self.dispatch
            .dispatch(ThemeAction::SetBackgroundColor(color.into()));
    }

    /// Observe every theme change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ThemeState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Whether both handles come from the same provider.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Store::ptr_eq(&a.store, &b.store)
    }
}

impl Default for ThemeProvider {
    fn default() -> Self {
        tracing::debug!("theme provider created");
        Self {
            context: ThemeContext::default(),
        }
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(ThemeState::default())
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("state", &self.store.get())
            .finish_non_exhaustive()
    }
}

/// Resolve the nearest [`ThemeProvider`], or report that there is none.
pub fn try_use_theme() -> Result<ThemeContext, ContextError> {
    use_context::<ThemeContext>().ok_or(ContextError::MissingProvider {
        accessor: "use_theme",
        provider: "ThemeProvider",
    })
}

/// Resolve the nearest [`ThemeProvider`].
///
/// # Panics
///
/// Panics when called outside every `ThemeProvider`. That is a composition
/// bug: wrap the calling subtree in a provider.
#[track_caller]
pub fn use_theme() -> ThemeContext {
    match try_use_theme() {
        Ok(context) => context,
        Err(err) => panic!("{err}"),
    }
}
