//! Snapshot stores.
//!
//! A [`Store`] owns state as immutable snapshots and notifies subscribers
//! after each mutation. States implementing [`Reducer`] can additionally be
//! driven by actions through a [`Dispatch`] handle.

mod store;

pub use store::{Dispatch, Reducer, Store, Subscription};
