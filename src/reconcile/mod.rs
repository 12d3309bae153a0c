//! Pairing of tool inputs with their outputs.
//!
//! Every function here is total over any prefix of a turn's parts: an index
//! out of range, or pointing at a part of the wrong shape, yields "nothing"
//! rather than an error.

use crate::types::{Invocation, InvocationState, Part, ToolPart};

/// Output for the input at `index`, scanning forward from `index + 1`.
///
/// `None` means "not yet available" (or `index` is not a tool input).
pub fn match_output(parts: &[Part], index: usize) -> Option<&ToolPart> {
    let input = parts.get(index)?.as_tool().filter(|tool| tool.is_input())?;
    parts
        .get(index + 1..)?
        .iter()
        .filter_map(Part::as_tool)
        .find(|candidate| candidate.is_output() && candidate.same_invocation(input))
}

/// Whether the output at `index` is already represented by an earlier part.
///
/// True when an input for the same invocation precedes it, in which case the
/// invocation built at the input's position carries this output. Also true
/// when an earlier output of the same invocation exists; duplicates are
/// ignored. False for an orphan, which then stands alone.
pub fn is_absorbed_output(parts: &[Part], index: usize) -> bool {
    let Some(output) = parts
        .get(index)
        .and_then(Part::as_tool)
        .filter(|tool| tool.is_output())
    else {
        return false;
    };
    has_earlier(parts, index, output)
}

/// Whether the input at `index` repeats an invocation already seen earlier.
///
/// A reused callId is a collaborator bug; the later record is ignored.
pub fn is_duplicate_input(parts: &[Part], index: usize) -> bool {
    let Some(input) = parts
        .get(index)
        .and_then(Part::as_tool)
        .filter(|tool| tool.is_input())
    else {
        return false;
    };
    has_earlier(parts, index, input)
}

fn has_earlier(parts: &[Part], index: usize, tool: &ToolPart) -> bool {
    parts[..index]
        .iter()
        .rev()
        .filter_map(Part::as_tool)
        .any(|earlier| earlier.same_invocation(tool))
}

/// Build the invocation anchored at the tool part at `index`.
///
/// An input resolves through [`match_output`]; an output seen here is an
/// orphan and is terminal immediately.
pub fn invocation_at(parts: &[Part], index: usize) -> Option<Invocation> {
    let tool = parts.get(index)?.as_tool()?;
    let (input, state) = if tool.is_input() {
        let state = match_output(parts, index)
            .map(|output| InvocationState::from_output(&output.payload))
            .unwrap_or(InvocationState::Pending);
        (Some(tool.payload.clone()), state)
    } else {
        (None, InvocationState::from_output(&tool.payload))
    };

    Some(Invocation {
        tool: tool.tool.clone(),
        call_id: tool.call_id.clone(),
        anchor: index,
        input,
        state,
    })
}
