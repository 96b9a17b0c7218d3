//! A deterministic reducer for the activity log of a chat surface.
//!
//! Locally sent and remotely received activities are merged into one
//! ordered, de-duplicated timeline. Typing indicators are kept per sender and
//! disappear as soon as that sender's next activity arrives.

mod app;
pub mod components;
pub mod environment;
pub mod view_model;

pub use app::{replay, run, Cli, ReplaySummary};
pub use components::history::{reduce, Action, ActionError, ActionKind, HistoryReducer, State};
pub use components::Reducer;
pub use environment::storage::Store;
pub use environment::types::{ConfigError, HistoryConfig};
pub use environment::Environment;
pub use view_model::{Activity, ActivityId, ActivityType, ChannelAccount, SenderId};
