use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

struct DebugCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for DebugCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::DEBUG {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` under a scoped subscriber and count the debug events it emits.
pub(crate) fn count_debug_events<F: FnOnce()>(f: F) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(DebugCounter(Arc::clone(&count)));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}
