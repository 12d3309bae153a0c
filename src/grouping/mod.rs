//! Grouping of repeated invocations of one tool.
//!
//! Several searches issued while the assistant refines a query are one
//! activity to the reader, so groupable tools render as a single panel that
//! fills in as outputs arrive.

use std::collections::HashSet;

use crate::reconcile::invocation_at;
use crate::types::{Invocation, Part, ToolKind, ToolPart};

/// Every invocation of `kind` anywhere in `parts`, one per distinct callId,
/// ordered by first appearance.
///
/// A callId first seen as an output is an orphan member anchored there.
pub fn collect_all(parts: &[Part], kind: &ToolKind) -> Vec<Invocation> {
    let mut seen = HashSet::new();
    parts
        .iter()
        .enumerate()
        .filter_map(|(index, part)| part.as_tool().map(|tool| (index, tool)))
        .filter(|(_, tool)| &tool.tool == kind)
        .filter(|(_, tool)| seen.insert(tool.call_id.as_str()))
        .filter_map(|(index, _)| invocation_at(parts, index))
        .collect()
}

/// True while any member is still waiting for its output.
pub fn group_loading(invocations: &[Invocation]) -> bool {
    invocations.iter().any(Invocation::is_pending)
}

/// A maximal run of consecutive parts of one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRun {
    pub tool: ToolKind,
    /// First position of the run.
    pub start: usize,
    /// One past the last position of the run.
    pub end: usize,
    /// Invocations first seen inside the run.
    pub invocations: Vec<Invocation>,
}

/// Whether `index` opens a run, i.e. the previous part is not the same tool.
pub fn is_run_start(parts: &[Part], index: usize) -> bool {
    let Some(tool) = parts.get(index).and_then(Part::as_tool) else {
        return false;
    };
    index == 0 || !same_tool(&parts[index - 1], tool)
}

/// The contiguous run beginning at `start`.
///
/// Outputs whose input lies before the run belong to an earlier unit and do
/// not become members. Returns `None` if `start` is not a tool part.
pub fn collect_run(parts: &[Part], start: usize) -> Option<ToolRun> {
    let first = parts.get(start)?.as_tool()?;
    let end = parts[start..]
        .iter()
        .position(|part| !same_tool(part, first))
        .map_or(parts.len(), |offset| start + offset);

    let mut seen: HashSet<&str> = parts[..start]
        .iter()
        .filter_map(Part::as_tool)
        .filter(|tool| tool.tool == first.tool)
        .map(|tool| tool.call_id.as_str())
        .collect();

    let invocations = (start..end)
        .filter(|&index| {
            parts[index]
                .as_tool()
                .is_some_and(|tool| seen.insert(tool.call_id.as_str()))
        })
        .filter_map(|index| invocation_at(parts, index))
        .collect();

    Some(ToolRun {
        tool: first.tool.clone(),
        start,
        end,
        invocations,
    })
}

fn same_tool(part: &Part, tool: &ToolPart) -> bool {
    part.as_tool().is_some_and(|other| other.tool == tool.tool)
}
