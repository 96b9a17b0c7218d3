use std::sync::Arc;

use serde_json::Value;

use crate::components::history::{Action, ActionError, HistoryReducer};
use crate::components::Reducer;

type Subscriber<S> = Box<dyn Fn(&Arc<S>)>;

/// Holds the current state of one reducer and applies actions to it, one at
/// a time. Dispatching needs `&mut self`, so there is only ever one writer.
pub struct Store<R: Reducer> {
    state: Arc<R::State>,
    environment: R::Environment,
    subscribers: Vec<(String, Subscriber<R::State>)>,
}

impl<R: Reducer> std::fmt::Debug for Store<R>
where
    R::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field(
                "subscribers",
                &self.subscribers.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(environment: R::Environment) -> Self {
        Self::with_state(Arc::default(), environment)
    }

    pub fn with_state(state: Arc<R::State>, environment: R::Environment) -> Self {
        Self {
            state,
            environment,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> Arc<R::State> {
        self.state.clone()
    }

    /// Apply `action`. Returns whether the state changed; subscribers are
    /// only notified if it did.
    pub fn dispatch(&mut self, action: R::Action) -> bool {
        let next = R::reduce(action, Some(self.state.clone()), &self.environment);
        if Arc::ptr_eq(&next, &self.state) {
            return false;
        }
        self.state = next;
        for (_, subscriber) in self.subscribers.iter() {
            subscriber(&self.state);
        }
        true
    }

    /// Register `callback` under `id`. An existing subscriber with the same
    /// id is replaced.
    pub fn subscribe(&mut self, id: impl Into<String>, callback: impl Fn(&Arc<R::State>) + 'static) {
        let id = id.into();
        let callback: Subscriber<R::State> = Box::new(callback);
        if let Some(entry) = self.subscribers.iter_mut().find(|(e, _)| e == &id) {
            entry.1 = callback;
        } else {
            self.subscribers.push((id, callback));
        }
    }

    pub fn unsubscribe(&mut self, id: &str) -> bool {
        let Some(pos) = self.subscribers.iter().position(|(e, _)| e == id) else {
            return false;
        };
        self.subscribers.remove(pos);
        true
    }
}

impl Store<HistoryReducer> {
    /// Decode a string-tagged action and dispatch it. A malformed action is
    /// handed back as an error and leaves the state alone.
    pub fn dispatch_value(&mut self, value: &Value) -> Result<bool, ActionError> {
        let action = match Action::from_value(value) {
            Ok(action) => action,
            Err(e) => {
                log::warn!("rejecting action: {e}");
                return Err(e);
            }
        };
        Ok(self.dispatch(action))
    }
}
