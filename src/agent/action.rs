use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON message contract the model must emit: a tagged union exchanged
/// as serialized text in the conversation.
///
/// Parsing is deliberately tolerant of nothing — any deviation becomes a
/// [`ProtocolError`] that the dispatch loop turns into a system-role
/// correction rather than a crash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    User {
        user: String,
    },
    Plan {
        plan: String,
    },
    #[serde(rename = "action")]
    Invoke {
        function: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<String>,
    },
    Observation {
        observation: Value,
    },
    Output {
        output: String,
    },
}

const KNOWN_TYPES: [&str; 5] = ["user", "plan", "action", "observation", "output"];

impl Action {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { user: text.into() }
    }

    pub fn observation(value: Value) -> Self {
        Self::Observation { observation: value }
    }

    /// Tag name as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Plan { .. } => "plan",
            Self::Invoke { .. } => "action",
            Self::Observation { .. } => "observation",
            Self::Output { .. } => "output",
        }
    }

    /// Parse a raw completion, distinguishing malformed JSON from a
    /// well-formed object carrying an unrecognized `type` tag.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| ProtocolError::InvalidJson(err.to_string()))?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        serde_json::from_value(value).map_err(|err| match kind {
            Some(kind) if !KNOWN_TYPES.contains(&kind.as_str()) => {
                ProtocolError::UnknownActionType { kind }
            }
            _ => ProtocolError::InvalidJson(err.to_string()),
        })
    }
}
