//! User/session store.
//!
//! [`UserProvider`] owns an optional [`UserRecord`]; descendants reach it
//! through [`use_user`], which also answers authentication and role checks.

mod provider;
mod record;

pub use provider::{try_use_user, use_user, UserContext, UserProvider};
pub use record::{UserRecord, UserState};
