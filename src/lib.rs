//! # Hearth
//!
//! Scoped theme and user-session stores for component trees.
//!
//! A provider owns a piece of state for the extent of a subtree; any code
//! running inside that subtree reaches the nearest provider through an
//! accessor. Calling an accessor outside every provider of its kind is a
//! composition bug and panics immediately.
//!
//! ## Stores
//!
//! - [`theme`] - current theme plus primary and background colors, changed
//!   only by dispatching [`ThemeAction`]s
//! - [`user`] - optional signed-in [`UserRecord`] with derived
//!   `is_authenticated` and `has_role`
//!
//! ## Building blocks
//!
//! - [`Store`] - snapshot state container with ordered subscribers
//! - [`Reducer`] / [`Dispatch`] - action-driven transitions
//! - [`runtime`] - the thread-local context registry providers bind into
//!
//! ```
//! use hearth::{use_theme, use_user, Theme, ThemeProvider, UserProvider, UserRecord};
//!
//! ThemeProvider::new().provide(|| {
//!     UserProvider::new().provide(|| {
//!         use_user().set_user(UserRecord::new("1", "al", "s1"));
//!         use_theme().set_theme(Theme::Dark);
//!
//!         assert!(use_user().is_authenticated());
//!         assert_eq!(use_theme().state().current_theme, Theme::Dark);
//!     })
//! });
//! ```

pub mod error;
pub mod runtime;
pub mod store;
pub mod theme;
pub mod user;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use error::{ContextError, ParseThemeError};
pub use store::{Dispatch, Reducer, Store, Subscription};
pub use theme::{
    try_use_theme, use_theme, Theme, ThemeAction, ThemeContext, ThemeProvider, ThemeState,
};
pub use user::{try_use_user, use_user, UserContext, UserProvider, UserRecord, UserState};
