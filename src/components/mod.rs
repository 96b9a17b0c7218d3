pub mod history;

use std::sync::Arc;

/// A pure state transition. `reduce` never modifies the state it is given;
/// when nothing changes it returns the same `Arc` back.
pub trait Reducer {
    type Action;

    type State: Default;

    type Environment;

    fn reduce(
        action: Self::Action,
        state: Option<Arc<Self::State>>,
        environment: &Self::Environment,
    ) -> Arc<Self::State>;
}
