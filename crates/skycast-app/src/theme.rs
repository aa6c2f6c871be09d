//! Shared light/dark theme signal.
//!
//! A single process-wide boolean with synchronous change notification.
//! Observers are called in subscription order and must unsubscribe on view
//! teardown. The value is not persisted; a new process starts light.

use parking_lot::Mutex;
use std::sync::Arc;

type Observer = Arc<dyn Fn(bool) + Send + Sync>;

/// Handle returned by [`ThemeSignal::subscribe`]; pass back to
/// [`ThemeSignal::unsubscribe`] to stop receiving notifications.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

#[derive(Default)]
struct ThemeInner {
    dark: bool,
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

#[derive(Default)]
pub struct ThemeSignal {
    inner: Mutex<ThemeInner>,
}

impl ThemeSignal {
    /// New signal in the default light state.
    pub fn new() -> Self {
        Self::default()
    }

    /// New signal with an explicit starting state (e.g. from config).
    pub fn with_initial(dark: bool) -> Self {
        Self {
            inner: Mutex::new(ThemeInner {
                dark,
                ..ThemeInner::default()
            }),
        }
    }

    /// Current theme state.
    pub fn is_dark(&self) -> bool {
        self.inner.lock().dark
    }

    /// Flip the theme and notify every observer synchronously, in
    /// subscription order. Returns the new state.
    pub fn toggle(&self) -> bool {
        let (dark, observers) = {
            let mut inner = self.inner.lock();
            inner.dark = !inner.dark;
            let observers: Vec<Observer> =
                inner.observers.iter().map(|(_, o)| o.clone()).collect();
            (inner.dark, observers)
        };

        // Observers run outside the lock so they may subscribe or toggle
        for observer in observers {
            observer(dark);
        }
        dark
    }

    /// Register an observer for theme changes.
    pub fn subscribe(&self, observer: impl Fn(bool) + Send + Sync + 'static) -> Subscription {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        Subscription(id)
    }

    /// Remove an observer.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .lock()
            .observers
            .retain(|(id, _)| *id != subscription.0);
    }
}
