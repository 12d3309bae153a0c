//! Presentation model produced by the render plan builder.

use serde::Serialize;
use serde_json::Value;

use super::outcome::ToolOutcome;
use super::tool::ToolKind;

/// Lifecycle of one invocation.
///
/// `Pending -> Resolved` when an output without error arrives,
/// `Pending -> Errored` when the output carries one. Both are terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationState {
    Pending,
    Resolved { output: Value },
    Errored { message: String, output: Value },
}

impl InvocationState {
    /// State reached once `payload` arrives as the tool's output.
    pub fn from_output(payload: &Value) -> Self {
        match ToolOutcome::from_payload(payload) {
            ToolOutcome::Ok(output) => Self::Resolved { output },
            ToolOutcome::Err(message) => Self::Errored {
                message,
                output: payload.clone(),
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

/// The logical pairing of a tool's input and output parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub tool: ToolKind,
    pub call_id: String,
    /// Position of the input part, or of the output for an orphan.
    pub anchor: usize,
    /// Arguments; `None` when the output arrived without a known input.
    pub input: Option<Value>,
    pub state: InvocationState,
}

impl Invocation {
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn is_orphan(&self) -> bool {
        self.input.is_none()
    }

    pub fn output(&self) -> Option<&Value> {
        match &self.state {
            InvocationState::Pending => None,
            InvocationState::Resolved { output } | InvocationState::Errored { output, .. } => {
                Some(output)
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            InvocationState::Errored { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Output as a result envelope; `None` while pending.
    pub fn outcome(&self) -> Option<ToolOutcome> {
        match &self.state {
            InvocationState::Pending => None,
            InvocationState::Resolved { output } => Some(ToolOutcome::Ok(output.clone())),
            InvocationState::Errored { message, .. } => Some(ToolOutcome::Err(message.clone())),
        }
    }
}

/// All invocations of one groupable tool within a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub tool: ToolKind,
    pub anchor: usize,
    pub invocations: Vec<Invocation>,
}

impl Group {
    pub fn new(tool: ToolKind, anchor: usize, invocations: Vec<Invocation>) -> Self {
        Self {
            tool,
            anchor,
            invocations,
        }
    }

    pub fn is_loading(&self) -> bool {
        crate::grouping::group_loading(&self.invocations)
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}

/// One presentation unit, anchored at a sequence position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderUnit {
    Text { anchor: usize, text: String },
    Reasoning { anchor: usize, text: String },
    SingleTool(Invocation),
    GroupedTool(Group),
}

impl RenderUnit {
    pub fn anchor(&self) -> usize {
        match self {
            Self::Text { anchor, .. } | Self::Reasoning { anchor, .. } => *anchor,
            Self::SingleTool(invocation) => invocation.anchor,
            Self::GroupedTool(group) => group.anchor,
        }
    }

    /// Variant name, stable across recomputations of the same anchor.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Reasoning { .. } => "reasoning",
            Self::SingleTool(_) => "single_tool",
            Self::GroupedTool(_) => "grouped_tool",
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Self::SingleTool(invocation) => invocation.is_pending(),
            Self::GroupedTool(group) => group.is_loading(),
            Self::Text { .. } | Self::Reasoning { .. } => false,
        }
    }

    /// Invocations represented by this unit.
    pub fn invocations(&self) -> &[Invocation] {
        match self {
            Self::SingleTool(invocation) => std::slice::from_ref(invocation),
            Self::GroupedTool(group) => &group.invocations,
            Self::Text { .. } | Self::Reasoning { .. } => &[],
        }
    }
}

/// Ordered render units for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderPlan {
    units: Vec<RenderUnit>,
}

impl RenderPlan {
    pub fn new(units: Vec<RenderUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[RenderUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<RenderUnit> {
        self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderUnit> {
        self.units.iter()
    }

    pub fn anchors(&self) -> Vec<usize> {
        self.units.iter().map(RenderUnit::anchor).collect()
    }

    /// Whether any unit should show a loading indicator.
    pub fn is_loading(&self) -> bool {
        self.units.iter().any(RenderUnit::is_loading)
    }

    /// Every invocation in the plan, group members included.
    pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        self.units.iter().flat_map(RenderUnit::invocations)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Invocation> {
        self.invocations()
            .filter(|invocation| invocation.error_message().is_some())
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a RenderUnit;
    type IntoIter = std::slice::Iter<'a, RenderUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
