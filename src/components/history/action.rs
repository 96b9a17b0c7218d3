use serde::de::DeserializeOwned;
use serde_json::Value;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::view_model::{Activity, ActivityId};

/// The string tags used by the dispatching side of the chat surface.
#[derive(IntoStaticStr, EnumString, EnumIter, Display, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActionKind {
    #[strum(serialize = "Receive_Message")]
    ReceiveMessage,
    #[strum(serialize = "Send_Message")]
    SendMessage,
    #[strum(serialize = "Receive_Sent_Message")]
    ReceiveSentMessage,
    #[strum(serialize = "Show_Typing")]
    ShowTyping,
    #[strum(serialize = "Clear_Typing")]
    ClearTyping,
    #[strum(serialize = "Select_Activity")]
    SelectActivity,
    #[strum(serialize = "Update_Input")]
    UpdateInput,
    #[strum(serialize = "Send_Message_Try")]
    SendMessageTry,
    #[strum(serialize = "Send_Message_Succeed")]
    SendMessageSucceed,
    #[strum(serialize = "Send_Message_Fail")]
    SendMessageFail,
}

impl ActionKind {
    /// Named by the action protocol but without any effect on the history
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            ActionKind::UpdateInput
                | ActionKind::SendMessageTry
                | ActionKind::SendMessageSucceed
                | ActionKind::SendMessageFail
        )
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Clone, PartialEq)]
pub enum Action {
    ReceiveMessage(Activity),
    /// A locally authored message. Bumps the client activity counter.
    SendMessage(Activity),
    /// The transport echoing one of our own messages back
    ReceiveSentMessage(Activity),
    ShowTyping(Activity),
    ClearTyping(ActivityId),
    SelectActivity(Option<Activity>),
    UpdateInput,
    SendMessageTry,
    SendMessageSucceed,
    SendMessageFail,
    /// Anything we don't know. `None` if the action had no type at all.
    Unknown(Option<String>),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReceiveMessage(arg0) => f.debug_tuple("ReceiveMessage").field(&arg0.id).finish(),
            Self::SendMessage(arg0) => f.debug_tuple("SendMessage").field(&arg0.id).finish(),
            Self::ReceiveSentMessage(arg0) => {
                f.debug_tuple("ReceiveSentMessage").field(&arg0.id).finish()
            }
            Self::ShowTyping(arg0) => f
                .debug_tuple("ShowTyping")
                .field(&arg0.id)
                .field(&arg0.from.id)
                .finish(),
            Self::ClearTyping(arg0) => f.debug_tuple("ClearTyping").field(arg0).finish(),
            Self::SelectActivity(arg0) => f
                .debug_tuple("SelectActivity")
                .field(&arg0.as_ref().map(|e| &e.id))
                .finish(),
            Self::UpdateInput => write!(f, "UpdateInput"),
            Self::SendMessageTry => write!(f, "SendMessageTry"),
            Self::SendMessageSucceed => write!(f, "SendMessageSucceed"),
            Self::SendMessageFail => write!(f, "SendMessageFail"),
            Self::Unknown(arg0) => f.debug_tuple("Unknown").field(arg0).finish(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("action is not a JSON object")]
    NotAnObject,

    #[error("{kind} action is missing `{field}`")]
    MissingField {
        kind: ActionKind,
        field: &'static str,
    },

    #[error("{kind} action has an invalid `{field}`: {source}")]
    InvalidField {
        kind: ActionKind,
        field: &'static str,
        source: serde_json::Error,
    },
}

impl Action {
    pub fn kind(&self) -> Option<ActionKind> {
        let kind = match self {
            Self::ReceiveMessage(_) => ActionKind::ReceiveMessage,
            Self::SendMessage(_) => ActionKind::SendMessage,
            Self::ReceiveSentMessage(_) => ActionKind::ReceiveSentMessage,
            Self::ShowTyping(_) => ActionKind::ShowTyping,
            Self::ClearTyping(_) => ActionKind::ClearTyping,
            Self::SelectActivity(_) => ActionKind::SelectActivity,
            Self::UpdateInput => ActionKind::UpdateInput,
            Self::SendMessageTry => ActionKind::SendMessageTry,
            Self::SendMessageSucceed => ActionKind::SendMessageSucceed,
            Self::SendMessageFail => ActionKind::SendMessageFail,
            Self::Unknown(_) => return None,
        };
        Some(kind)
    }

    /// Decode a string-tagged action record such as
    /// `{"type": "Receive_Message", "activity": {...}}`.
    ///
    /// A missing or unknown `type` is not an error, it decodes into
    /// [`Action::Unknown`]. Known types with a broken payload are rejected.
    pub fn from_value(value: &Value) -> Result<Action, ActionError> {
        let Some(object) = value.as_object() else {
            return Err(ActionError::NotAnObject);
        };
        let name = match object.get("type") {
            None | Some(Value::Null) => return Ok(Action::Unknown(None)),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        };
        let Ok(kind) = name.parse::<ActionKind>() else {
            return Ok(Action::Unknown(Some(name)));
        };

        let action = match kind {
            ActionKind::ReceiveMessage => Action::ReceiveMessage(required(value, kind, "activity")?),
            ActionKind::SendMessage => Action::SendMessage(required(value, kind, "activity")?),
            ActionKind::ReceiveSentMessage => {
                Action::ReceiveSentMessage(required(value, kind, "activity")?)
            }
            ActionKind::ShowTyping => Action::ShowTyping(required(value, kind, "activity")?),
            ActionKind::ClearTyping => Action::ClearTyping(required(value, kind, "id")?),
            ActionKind::SelectActivity => {
                Action::SelectActivity(optional(value, kind, "selectedActivity")?)
            }
            ActionKind::UpdateInput => Action::UpdateInput,
            ActionKind::SendMessageTry => Action::SendMessageTry,
            ActionKind::SendMessageSucceed => Action::SendMessageSucceed,
            ActionKind::SendMessageFail => Action::SendMessageFail,
        };
        Ok(action)
    }
}

fn required<T: DeserializeOwned>(
    value: &Value,
    kind: ActionKind,
    field: &'static str,
) -> Result<T, ActionError> {
    optional(value, kind, field)?.ok_or(ActionError::MissingField { kind, field })
}

fn optional<T: DeserializeOwned>(
    value: &Value,
    kind: ActionKind,
    field: &'static str,
) -> Result<Option<T>, ActionError> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(inner) => serde_json::from_value(inner.clone())
            .map(Some)
            .map_err(|source| ActionError::InvalidField {
                kind,
                field,
                source,
            }),
    }
}
