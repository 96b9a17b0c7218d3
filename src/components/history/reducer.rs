use std::sync::Arc;

use super::action::Action;
use super::history_helpers::{remove_activity, upsert_activity};
use super::state::State;

/// Compute the successor of `state`.
///
/// `None` stands for "no state yet" and starts from [`State::default`].
/// Actions without an effect hand back the very same `Arc`, so callers can
/// detect changes with [`Arc::ptr_eq`]. The given state is never modified.
pub fn reduce(state: Option<Arc<State>>, action: Action) -> Arc<State> {
    log::trace!("{action:?}");
    let state = state.unwrap_or_default();

    match action {
        Action::ReceiveMessage(activity)
        | Action::ReceiveSentMessage(activity)
        | Action::ShowTyping(activity) => {
            let activities = upsert_activity(&state.activities, activity);
            Arc::new(State {
                activities,
                ..State::clone(&state)
            })
        }
        Action::SendMessage(activity) => {
            let Some(client_activity_counter) = state.client_activity_counter.checked_add(1) else {
                log::warn!("client activity counter exhausted, dropping {}", activity.id);
                return state;
            };
            let mut activities = state.activities.clone();
            activities.push_back(activity);
            Arc::new(State {
                activities,
                client_activity_counter,
                ..State::clone(&state)
            })
        }
        Action::ClearTyping(id) => {
            let Some(activities) = remove_activity(&state.activities, &id) else {
                return state;
            };
            Arc::new(State {
                activities,
                ..State::clone(&state)
            })
        }
        Action::SelectActivity(selected_activity) => Arc::new(State {
            selected_activity,
            ..State::clone(&state)
        }),
        Action::UpdateInput
        | Action::SendMessageTry
        | Action::SendMessageSucceed
        | Action::SendMessageFail
        | Action::Unknown(_) => {
            if action.kind().is_some_and(|kind| kind.is_reserved()) {
                log::debug!("ignoring reserved action {action:?}");
            }
            state
        }
    }
}
