//! Render plan construction.
//!
//! The plan is a pure function of the part sequence. Callers rebuild it from
//! scratch whenever the sequence grows; because every anchor is chosen by the
//! same rule over an append-only prefix, units already on screen keep their
//! position and type and only their invocation state moves forward.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::{GroupingStrategy, PlanConfig};
use crate::grouping::{collect_all, collect_run, is_run_start};
use crate::reconcile::{invocation_at, is_absorbed_output, is_duplicate_input};
use crate::types::{Group, Part, PartContent, RenderPlan, RenderUnit, ToolKind, ToolPart};

/// Build the render plan for `parts` with the default configuration.
pub fn build_render_plan(parts: &[Part]) -> RenderPlan {
    PlanBuilder::default().build(parts)
}

/// Builds render plans under a [`PlanConfig`].
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    config: PlanConfig,
}

impl PlanBuilder {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Walk `parts` once and emit units in anchor order.
    pub fn build(&self, parts: &[Part]) -> RenderPlan {
        let mut emitted: HashSet<&ToolKind> = HashSet::new();
        let mut units = Vec::new();

        for (index, part) in parts.iter().enumerate() {
            match &part.content {
                PartContent::Text { text } => units.push(RenderUnit::Text {
                    anchor: index,
                    text: text.clone(),
                }),
                PartContent::Reasoning { text } => {
                    if self.config.keep_empty_reasoning || !text.trim().is_empty() {
                        units.push(RenderUnit::Reasoning {
                            anchor: index,
                            text: text.clone(),
                        });
                    } else {
                        trace!(position = index, "skipping blank reasoning");
                    }
                }
                PartContent::Tool(tool) => {
                    if let Some(unit) = self.tool_unit(parts, index, tool, &mut emitted) {
                        units.push(unit);
                    }
                }
            }
        }

        debug!(parts = parts.len(), units = units.len(), "built render plan");
        RenderPlan::new(units)
    }

    fn tool_unit<'a>(
        &self,
        parts: &'a [Part],
        index: usize,
        tool: &'a ToolPart,
        emitted: &mut HashSet<&'a ToolKind>,
    ) -> Option<RenderUnit> {
        if self.config.is_groupable(&tool.tool) {
            return match self.config.strategy {
                GroupingStrategy::AllOccurrences => {
                    if !emitted.insert(&tool.tool) {
                        trace!(position = index, tool = %tool.tool, "part already grouped");
                        return None;
                    }
                    let invocations = collect_all(parts, &tool.tool);
                    Some(RenderUnit::GroupedTool(Group::new(
                        tool.tool.clone(),
                        index,
                        invocations,
                    )))
                }
                GroupingStrategy::ContiguousRun => {
                    if !is_run_start(parts, index) {
                        return None;
                    }
                    let run = collect_run(parts, index)?;
                    let anchor = run.invocations.first()?.anchor;
                    Some(RenderUnit::GroupedTool(Group::new(
                        run.tool,
                        anchor,
                        run.invocations,
                    )))
                }
            };
        }

        if tool.is_output() && is_absorbed_output(parts, index) {
            trace!(position = index, call_id = %tool.call_id, "output absorbed by its input");
            return None;
        }

        if tool.is_input() && is_duplicate_input(parts, index) {
            debug!(
                position = index,
                tool = %tool.tool,
                call_id = %tool.call_id,
                "ignoring input for an invocation already seen"
            );
            return None;
        }

        invocation_at(parts, index).map(RenderUnit::SingleTool)
    }
}
