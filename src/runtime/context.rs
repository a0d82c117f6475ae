use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

/// A value bound by a provider for the extent of its subtree.
struct Frame {
    type_id: TypeId,
    value: Rc<dyn Any>,
}

// Thread-local stack of provider frames, innermost last
thread_local! {
    static CONTEXT_STACK: RefCell<Vec<Frame>> = RefCell::new(vec![]);
}

/// Run `f` with `value` bound as the nearest context of type `T`.
///
/// The binding is visible to [`use_context`] calls made on this thread for
/// the duration of `f` and is removed when `f` returns, including when it
/// unwinds. Bindings nest: an inner binding of the same type shadows the
/// outer one until the inner call returns.
///
/// # Examples
///
/// ```
/// use hearth::runtime::{provide_context, use_context};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Locale(&'static str);
///
/// provide_context(Locale("en"), || {
///     assert_eq!(use_context::<Locale>(), Some(Locale("en")));
///
///     provide_context(Locale("fr"), || {
///         assert_eq!(use_context::<Locale>(), Some(Locale("fr")));
///     });
///
///     assert_eq!(use_context::<Locale>(), Some(Locale("en")));
/// });
///
/// assert_eq!(use_context::<Locale>(), None);
/// ```
pub fn provide_context<T, F, R>(value: T, f: F) -> R
where
    T: Any,
    F: FnOnce() -> R,
{
    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().push(Frame {
            type_id: TypeId::of::<T>(),
            value: Rc::new(value),
        });
    });

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });

    match result {
        Ok(r) => r,
        Err(e) => std::panic::resume_unwind(e),
    }
}

/// Resolve the nearest enclosing context of type `T`.
///
/// Returns `None` when no provider of `T` is active on this thread.
pub fn use_context<T>() -> Option<T>
where
    T: Any + Clone,
{
    CONTEXT_STACK.with(|stack| {
        stack
            .borrow()
            .iter()
            .rev()
            .find(|frame| frame.type_id == TypeId::of::<T>())
            .and_then(|frame| frame.value.downcast_ref::<T>())
            .cloned()
    })
}

/// Whether a context of type `T` is currently bound on this thread.
pub fn has_context<T: Any>() -> bool {
    CONTEXT_STACK.with(|stack| {
        stack
            .borrow()
            .iter()
            .any(|frame| frame.type_id == TypeId::of::<T>())
    })
}

/// Number of provider frames currently active on this thread.
pub fn depth() -> usize {
    CONTEXT_STACK.with(|stack| stack.borrow().len())
}
