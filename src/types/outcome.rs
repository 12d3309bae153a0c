//! Result envelope for tool outputs.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Outcome of a tool invocation, validated from its output payload.
///
/// Serialized as `{"ok": true, "data": ...}` or `{"ok": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome<T = Value> {
    Ok(T),
    Err(String),
}

impl ToolOutcome {
    /// Classify a raw output payload.
    ///
    /// Any object carrying a truthy `error` key is a failure, regardless of
    /// which tool produced it.
    pub fn from_payload(payload: &Value) -> Self {
        match payload.get("error") {
            Some(error) if is_truthy(error) => Self::Err(error_message(error)),
            _ => Self::Ok(payload.clone()),
        }
    }

    /// Re-type the data for a specific tool.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<ToolOutcome<T>> {
        Ok(match self {
            Self::Ok(data) => ToolOutcome::Ok(serde_json::from_value(data.clone())?),
            Self::Err(message) => ToolOutcome::Err(message.clone()),
        })
    }
}

impl<T> ToolOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok(data) => Some(data),
            Self::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Err(message) => Some(message),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Self::Ok(data) => Ok(data),
            Self::Err(message) => Err(message),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> Serialize for ToolOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let envelope = match self {
            Self::Ok(data) => Envelope {
                ok: true,
                data: Some(data),
                error: None,
            },
            Self::Err(message) => Envelope {
                ok: false,
                data: None,
                error: Some(message.clone()),
            },
        };
        envelope.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ToolOutcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let envelope = Envelope::<T>::deserialize(deserializer)?;
        if envelope.ok {
            envelope
                .data
                .map(Self::Ok)
                .ok_or_else(|| de::Error::missing_field("data"))
        } else {
            Ok(Self::Err(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// JavaScript-style truthiness, which is how tool payloads signal errors.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}
