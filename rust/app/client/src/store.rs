use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::action::Action;
use crate::reducer::{root_reducer, RootState};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&Action, &RootState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the root state and applies actions to it.
///
/// - `dispatch(action)` runs the root reducer and notifies subscribers.
/// - `state()` returns a snapshot.
/// - `subscribe(handler)` registers a change handler.
pub struct Store {
    state: RwLock<RootState>,
    handlers: RwLock<Vec<(SubscriptionId, ChangeHandler)>>,
    next_id: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(RootState::default())
    }

    pub fn with_state(state: RootState) -> Self {
        Self {
            state: RwLock::new(state),
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Fold an action into the state, then notify every subscriber.
    ///
    /// Handlers run after the state lock is released, so they may read
    /// the store or dispatch again.
    pub fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "dispatch");
        let next = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let prev = std::mem::take(&mut *state);
            *state = root_reducer(prev, &action);
            state.clone()
        };

        let handlers: Vec<ChangeHandler> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(&action, &next);
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RootState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Action, &RootState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|(sid, _)| *sid != id);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
