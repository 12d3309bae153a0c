//! Convenience re-exports for common use.

pub use crate::config::{GroupingStrategy, PlanConfig};
pub use crate::error::{Result, TurnPlanError};
pub use crate::plan::{build_render_plan, PlanBuilder};
pub use crate::store::{plan_stream, PartStore, PlanTransform};
pub use crate::types::{
    Group, Invocation, InvocationState, Part, PartContent, RenderPlan, RenderUnit, ToolKind,
    ToolOutcome, ToolPart, ToolPhase, WirePart,
};
