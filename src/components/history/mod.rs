mod action;
mod history_helpers;
mod reducer;
mod state;

pub use action::{Action, ActionError, ActionKind};
pub use history_helpers::{position_of, remove_activity, trim_to_limit, upsert_activity};
pub use reducer::reduce;
pub use state::State;

use std::sync::Arc;

use super::Reducer;
use crate::environment::Environment;

pub struct HistoryReducer;

impl Reducer for HistoryReducer {
    type Action = Action;

    type State = State;

    type Environment = Environment;

    fn reduce(
        action: Self::Action,
        state: Option<Arc<Self::State>>,
        environment: &Self::Environment,
    ) -> Arc<Self::State> {
        let previous = state.clone();
        let next = reducer::reduce(state, action);
        let changed = previous.map_or(true, |p| !Arc::ptr_eq(&p, &next));
        let Some(limit) = environment.config.history_limit.filter(|_| changed) else {
            return next;
        };
        let Some(activities) = trim_to_limit(&next.activities, limit) else {
            return next;
        };
        log::debug!(
            "trimmed history from {} to {} entries",
            next.activities.len(),
            activities.len()
        );
        Arc::new(State {
            activities,
            ..State::clone(&next)
        })
    }
}
