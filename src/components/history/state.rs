use im::Vector;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::view_model::Activity;

/// The conversation log as seen by the chat surface.
///
/// Values of this type are never mutated once handed out. Transitions build
/// a successor; `activities` is a persistent vector so the successor shares
/// all untouched entries with its predecessor.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default)]
    pub activities: Vector<Activity>,
    #[serde(default)]
    pub selected_activity: Option<Activity>,
    /// Composition buffer. Carried along, never touched by history actions.
    #[serde(default)]
    pub input: String,
    /// Number of locally sent activities accepted so far
    #[serde(default)]
    pub client_activity_counter: u64,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field(
                "activities",
                &self.activities.iter().map(|e| &e.id.0).join(", "),
            )
            .field(
                "selected_activity",
                &self.selected_activity.as_ref().map(|e| &e.id),
            )
            .field("input", &self.input.len())
            .field("client_activity_counter", &self.client_activity_counter)
            .finish()
    }
}

impl State {
    pub fn new(activities: impl IntoIterator<Item = Activity>) -> Self {
        Self {
            activities: activities.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_counter(mut self, client_activity_counter: u64) -> Self {
        self.client_activity_counter = client_activity_counter;
        self
    }
}
