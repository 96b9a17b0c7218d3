use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accepts both `"abc"` and `42` on the wire; ids are compared in their string form.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Text(s) => s,
            RawId::Number(n) => normalize_number(&n),
        }
    }
}

/// `1` and `1.0` are the same number and so the same id
fn normalize_number(n: &serde_json::Number) -> String {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Default, Clone, Debug, Serialize, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ActivityId);
id_newtype!(SenderId);

#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    #[default]
    Message,
    Typing,
    /// Any other activity kind (`event`, `conversationUpdate`, ...) is carried as-is
    Other(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Message => "message",
            ActivityType::Typing => "typing",
            ActivityType::Other(s) => s.as_str(),
        }
    }

    pub fn is_typing(&self) -> bool {
        matches!(self, ActivityType::Typing)
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "message" => ActivityType::Message,
            "typing" => ActivityType::Typing,
            _ => ActivityType::Other(value),
        }
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChannelAccount {
    pub id: SenderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single entry of the conversation log.
///
/// Only `id`, `type` and `from.id` are ever inspected. Everything else is
/// payload that is carried through untouched, including members this struct
/// doesn't name (they end up in `extra`).
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub from: ChannelAccount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Activity {
    pub fn new(id: impl Into<ActivityId>, kind: ActivityType, from: impl Into<SenderId>) -> Self {
        Self {
            id: id.into(),
            kind,
            from: ChannelAccount {
                id: from.into(),
                name: None,
            },
            ..Default::default()
        }
    }

    pub fn message(
        id: impl Into<ActivityId>,
        from: impl Into<SenderId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, ActivityType::Message, from)
        }
    }

    pub fn typing(id: impl Into<ActivityId>, from: impl Into<SenderId>) -> Self {
        Self::new(id, ActivityType::Typing, from)
    }

    pub fn sender(&self) -> &SenderId {
        &self.from.id
    }

    /// Is this the typing indicator of `sender`?
    pub fn is_typing_from(&self, sender: &SenderId) -> bool {
        self.kind.is_typing() && &self.from.id == sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        let a: Activity =
            serde_json::from_value(json!({"id": 1, "type": "message", "from": {"id": 42}}))
                .unwrap();
        let b: Activity =
            serde_json::from_value(json!({"id": "1", "type": "message", "from": {"id": "42"}}))
                .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.sender(), b.sender());
        assert_eq!(a.id, ActivityId::from(1));
    }

    #[test]
    fn integral_float_ids_match_integer_ids() {
        let ids: Vec<ActivityId> = [json!(1), json!(1.0), json!(-0.0), json!(1.5)]
            .into_iter()
            .map(|raw| serde_json::from_value(raw).unwrap())
            .collect();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[1], ActivityId::from(1));
        assert_eq!(ids[2], ActivityId::from(0));
        assert_eq!(ids[3].0, "1.5");
    }

    #[test]
    fn unknown_members_are_preserved() {
        let raw = json!({
            "id": "7",
            "type": "event",
            "from": {"id": "bot", "name": "Bot"},
            "channelData": {"clientActivityId": 89},
            "channelId": "a bit of data",
            "conversation": {"id": 752},
            "value": {"nested": [1, 2, 3]},
            "timestamp": "2017-01-01T00:00:00Z"
        });
        let activity: Activity = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(activity.kind, ActivityType::Other("event".to_string()));
        assert_eq!(activity.channel_id.as_deref(), Some("a bit of data"));
        assert_eq!(activity.extra.len(), 2);
        assert_eq!(serde_json::to_value(&activity).unwrap(), raw);
    }

    #[test]
    fn typing_is_scoped_to_sender() {
        let typing = Activity::typing(4, 42);
        assert!(typing.is_typing_from(&SenderId::from(42)));
        assert!(!typing.is_typing_from(&SenderId::from(55)));
        assert!(!Activity::message(1, 42, "hi").is_typing_from(&SenderId::from(42)));
    }
}
