pub mod storage;
pub mod types;

use self::types::HistoryConfig;

/// What reducers get to see besides the action and the state
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub config: HistoryConfig,
}

impl Environment {
    pub fn new(config: HistoryConfig) -> Self {
        Self { config }
    }
}
