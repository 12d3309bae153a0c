//! Parts: the atomic, arrival-ordered records of one assistant turn.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use super::tool::ToolKind;
use crate::error::{Result, TurnPlanError};

/// Phase of a tool part.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ToolPhase {
    /// Arguments are known; the tool has not answered yet.
    InputAvailable,
    /// The tool answered. The payload may carry an `error`.
    OutputAvailable,
}

/// One half of a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolPart {
    pub tool: ToolKind,
    pub call_id: String,
    pub phase: ToolPhase,
    #[serde(default)]
    pub payload: Value,
}

impl ToolPart {
    pub fn is_input(&self) -> bool {
        self.phase == ToolPhase::InputAvailable
    }

    pub fn is_output(&self) -> bool {
        self.phase == ToolPhase::OutputAvailable
    }

    /// Whether both parts belong to the same (tool, callId) invocation.
    pub fn same_invocation(&self, other: &ToolPart) -> bool {
        self.tool == other.tool && self.call_id == other.call_id
    }
}

/// Content of a part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartContent {
    Text { text: String },
    Reasoning { text: String },
    Tool(ToolPart),
}

impl PartContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::Reasoning { text: text.into() }
    }

    pub fn tool_input(tool: impl Into<ToolKind>, call_id: impl Into<String>, args: Value) -> Self {
        Self::Tool(ToolPart {
            tool: tool.into(),
            call_id: call_id.into(),
            phase: ToolPhase::InputAvailable,
            payload: args,
        })
    }

    pub fn tool_output(tool: impl Into<ToolKind>, call_id: impl Into<String>, result: Value) -> Self {
        Self::Tool(ToolPart {
            tool: tool.into(),
            call_id: call_id.into(),
            phase: ToolPhase::OutputAvailable,
            payload: result,
        })
    }
}

/// An atomic record in a turn's sequence.
///
/// `position` equals the part's index in the sequence; [`PartStore`] assigns
/// it on append and it never changes afterwards.
///
/// [`PartStore`]: crate::store::PartStore
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub position: usize,
    #[serde(flatten)]
    pub content: PartContent,
}

impl Part {
    pub fn new(position: usize, content: PartContent) -> Self {
        Self { position, content }
    }

    /// The tool half carried by this part, if any.
    pub fn as_tool(&self) -> Option<&ToolPart> {
        match &self.content {
            PartContent::Tool(tool) => Some(tool),
            _ => None,
        }
    }

    /// Wire-style kind label: `text`, `reasoning` or `tool:<name>`.
    pub fn kind_label(&self) -> String {
        match &self.content {
            PartContent::Text { .. } => "text".to_string(),
            PartContent::Reasoning { .. } => "reasoning".to_string(),
            PartContent::Tool(tool) => format!("tool:{}", tool.tool),
        }
    }

    /// Validate a wire record into a part at `position`.
    pub fn from_wire(position: usize, wire: WirePart) -> Result<Self> {
        let WirePart {
            kind,
            call_id,
            phase,
            payload,
            input,
            output,
            text,
            error_text,
        } = wire;

        let content = match kind.as_str() {
            "text" => PartContent::Text {
                text: text_content(text, payload),
            },
            "reasoning" => PartContent::Reasoning {
                text: text_content(text, payload),
            },
            other => {
                let name = other
                    .strip_prefix("tool:")
                    .or_else(|| other.strip_prefix("tool-"))
                    .ok_or_else(|| {
                        TurnPlanError::malformed(position, format!("unknown part kind '{other}'"))
                    })?;
                if name.is_empty() {
                    return Err(TurnPlanError::malformed(position, "tool part has no tool name"));
                }
                let call_id = call_id.filter(|id| !id.is_empty()).ok_or_else(|| {
                    TurnPlanError::malformed(position, format!("tool part '{name}' has no callId"))
                })?;
                let phase = phase.ok_or_else(|| {
                    TurnPlanError::malformed(position, format!("tool part '{name}' has no phase"))
                })?;

                let (phase, payload) = match phase.as_str() {
                    "output-error" => {
                        let error = error_text
                            .map(Value::String)
                            .or(output)
                            .or(payload)
                            .unwrap_or_else(|| Value::String("tool failed".to_string()));
                        (
                            ToolPhase::OutputAvailable,
                            serde_json::json!({ "error": error }),
                        )
                    }
                    other => {
                        let phase = other.parse::<ToolPhase>().map_err(|_| {
                            TurnPlanError::malformed(position, format!("unknown phase '{other}'"))
                        })?;
                        let carried = match phase {
                            ToolPhase::InputAvailable => input,
                            ToolPhase::OutputAvailable => output,
                        };
                        (phase, carried.or(payload).unwrap_or(Value::Null))
                    }
                };

                PartContent::Tool(ToolPart {
                    tool: ToolKind::from_name(name),
                    call_id,
                    phase,
                    payload,
                })
            }
        };

        Ok(Self { position, content })
    }
}

fn text_content(text: Option<String>, payload: Option<Value>) -> String {
    text.or_else(|| match payload {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
    .unwrap_or_default()
}

/// Ingress shape of a part as delivered by the stream transport.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WirePart {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, alias = "toolCallId", skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default, alias = "state", skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Tool arguments in the AI-SDK shape. Output records repeat them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
}

impl WirePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn tool(
        name: &str,
        call_id: impl Into<String>,
        phase: ToolPhase,
        payload: Value,
    ) -> Self {
        Self {
            kind: format!("tool:{name}"),
            call_id: Some(call_id.into()),
            phase: Some(phase.to_string()),
            payload: Some(payload),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: Value) -> WirePart {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn text_from_payload_string() {
        let part = Part::from_wire(0, wire(json!({"kind": "text", "payload": "Hallo"}))).unwrap();
        assert_eq!(part.content, PartContent::text("Hallo"));
    }

    #[test]
    fn tool_input_with_colon_kind() {
        let part = Part::from_wire(
            3,
            wire(json!({
                "kind": "tool:searchDatasets",
                "callId": "a",
                "phase": "input-available",
                "payload": {"q": "energy"}
            })),
        )
        .unwrap();
        assert_eq!(part.position, 3);
        assert_eq!(
            part.content,
            PartContent::tool_input(ToolKind::SearchDatasets, "a", json!({"q": "energy"}))
        );
    }

    #[test]
    fn ai_sdk_spelling_is_accepted() {
        let part = Part::from_wire(
            0,
            wire(json!({
                "type": "tool-createDocument",
                "toolCallId": "c1",
                "state": "output-available",
                "payload": {"id": "doc-1"}
            })),
        )
        .unwrap();
        let tool = part.as_tool().unwrap();
        assert_eq!(tool.tool, ToolKind::CreateDocument);
        assert!(tool.is_output());
    }

    #[test]
    fn ai_sdk_input_and_output_fields_carry_the_payload() {
        let input = Part::from_wire(
            0,
            wire(json!({
                "type": "tool-createDocument",
                "toolCallId": "a",
                "state": "input-available",
                "input": {"title": "Report"}
            })),
        )
        .unwrap();
        assert_eq!(input.as_tool().unwrap().payload, json!({"title": "Report"}));

        let output = Part::from_wire(
            1,
            wire(json!({
                "type": "tool-createDocument",
                "toolCallId": "a",
                "state": "output-available",
                "input": {"title": "Report"},
                "output": {"error": "permission denied"}
            })),
        )
        .unwrap();
        let tool = output.as_tool().unwrap();
        assert!(tool.is_output());
        assert_eq!(tool.payload, json!({"error": "permission denied"}));
    }

    #[test]
    fn output_error_phase_becomes_error_payload() {
        let part = Part::from_wire(
            0,
            wire(json!({
                "kind": "tool:createDocument",
                "callId": "a",
                "phase": "output-error",
                "errorText": "permission denied"
            })),
        )
        .unwrap();
        let tool = part.as_tool().unwrap();
        assert!(tool.is_output());
        assert_eq!(tool.payload, json!({"error": "permission denied"}));
    }

    #[test]
    fn missing_call_id_is_malformed() {
        let err = Part::from_wire(
            5,
            wire(json!({"kind": "tool:searchDatasets", "phase": "input-available"})),
        )
        .unwrap_err();
        assert!(matches!(err, TurnPlanError::MalformedPart { position: 5, .. }));
    }

    #[test]
    fn empty_call_id_is_malformed() {
        let err = Part::from_wire(
            0,
            wire(json!({"kind": "tool:searchDatasets", "callId": "", "phase": "input-available"})),
        )
        .unwrap_err();
        assert!(matches!(err, TurnPlanError::MalformedPart { .. }));
    }

    #[test]
    fn unknown_phase_and_kind_are_malformed() {
        assert!(Part::from_wire(
            0,
            wire(json!({"kind": "tool:searchDatasets", "callId": "a", "phase": "input-streaming"}))
        )
        .is_err());
        assert!(Part::from_wire(0, wire(json!({"kind": "image"}))).is_err());
        assert!(Part::from_wire(0, wire(json!({"kind": "tool:", "callId": "a"}))).is_err());
    }

    #[test]
    fn kind_label_uses_wire_names() {
        let part = Part::new(0, PartContent::tool_input("getDatasetDetails", "x", json!({})));
        assert_eq!(part.kind_label(), "tool:getDatasetDetails");
        assert_eq!(Part::new(1, PartContent::reasoning("hm")).kind_label(), "reasoning");
    }
}
