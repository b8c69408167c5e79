//! Single-writer state container with queued, non-interleaving dispatch.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;

use super::reducer::Reducer;

type SubscriberFn<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// State container for one reducer.
///
/// `dispatch` is synchronous: exactly one reducer application per action,
/// never interleaved. A dispatch that arrives while another is being
/// applied (from another thread, or from a subscriber callback) is queued
/// and applied by the active drainer in arrival order.
///
/// Cloning the store clones a handle to the same shared state.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    state: RwLock<R::State>,
    queue: Mutex<DispatchQueue<R::Action>>,
    subscribers: RwLock<Vec<(u64, SubscriberFn<R::State>)>>,
    taps: Mutex<Vec<mpsc::UnboundedSender<R::Action>>>,
    next_subscriber_id: AtomicU64,
}

struct DispatchQueue<A> {
    pending: VecDeque<A>,
    /// True while some caller is applying queued actions. At most one
    /// drainer exists at a time; everyone else only enqueues.
    draining: bool,
}

impl<R: Reducer> Store<R> {
    /// Create a store with the state type's default value.
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    /// Create a store seeded with an explicit initial state.
    pub fn with_state(initial: R::State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(initial),
                queue: Mutex::new(DispatchQueue {
                    pending: VecDeque::new(),
                    draining: false,
                }),
                subscribers: RwLock::new(Vec::new()),
                taps: Mutex::new(Vec::new()),
                next_subscriber_id: AtomicU64::new(0),
            }),
        }
    }

    /// Apply `action` through the reducer and notify subscribers.
    ///
    /// If another dispatch is already in progress the action is queued
    /// and applied after the in-progress one completes; the call returns
    /// immediately in that case.
    pub fn dispatch(&self, action: R::Action) {
        {
            let mut queue = self.inner.queue.lock();
            queue.pending.push_back(action);
            if queue.draining {
                // The active drainer will pick this one up.
                return;
            }
            queue.draining = true;
        }
        self.drain();
    }

    /// Clone of the current state value.
    pub fn state(&self) -> R::State {
        self.inner.state.read().clone()
    }

    /// Register a subscriber called with the new state after every
    /// reducer application, in subscription order.
    ///
    /// Dropping the returned handle unsubscribes.
    pub fn subscribe(
        &self,
        callback: impl Fn(&R::State) + Send + Sync + 'static,
    ) -> Subscription<R> {
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.write().push((id, Arc::new(callback)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tap the dispatched action sequence, in dispatch order.
    ///
    /// Actions are delivered after their reducer application, so a
    /// consumer reading `state()` always observes the action's own
    /// transition (or a later one). Closed taps are pruned lazily.
    pub fn action_stream(&self) -> mpsc::UnboundedReceiver<R::Action> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.taps.lock().push(tx);
        rx
    }

    fn drain(&self) {
        loop {
            let action = {
                let mut queue = self.inner.queue.lock();
                match queue.pending.pop_front() {
                    Some(action) => action,
                    None => {
                        queue.draining = false;
                        return;
                    }
                }
            };

            let new_state = {
                let mut state = self.inner.state.write();
                let next = R::reduce(state.clone(), action.clone());
                *state = next.clone();
                next
            };

            self.forward_to_taps(&action);
            self.notify(&new_state);
        }
    }

    fn forward_to_taps(&self, action: &R::Action) {
        let mut taps = self.inner.taps.lock();
        taps.retain(|tap| tap.send(action.clone()).is_ok());
    }

    /// Invoke subscribers outside the state and registry locks so a
    /// callback may dispatch or unsubscribe without deadlocking.
    fn notify(&self, state: &R::State) {
        let subscribers: Vec<SubscriberFn<R::State>> = self
            .inner
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for subscriber in subscribers {
            subscriber(state);
        }
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII unsubscribe handle returned by [`Store::subscribe`].
pub struct Subscription<R: Reducer> {
    id: u64,
    inner: Weak<StoreInner<R>>,
}

impl<R: Reducer> Drop for Subscription<R> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.subscribers.write().retain(|(id, _)| *id != self.id);
        }
    }
}
