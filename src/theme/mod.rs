//! Theme store.
//!
//! [`ThemeProvider`] owns a [`ThemeState`] for a subtree; descendants reach
//! it through [`use_theme`] and change it only by dispatching
//! [`ThemeAction`]s.

mod provider;
mod state;

pub use provider::{try_use_theme, use_theme, ThemeContext, ThemeProvider};
pub use state::{
    Theme, ThemeAction, ThemeState, DEFAULT_BACKGROUND_COLOR, DEFAULT_PRIMARY_COLOR,
};
