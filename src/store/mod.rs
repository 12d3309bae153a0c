//! Append-only part storage and the streaming plan adapter.

use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::warn;

use crate::error::Result;
use crate::plan::PlanBuilder;
use crate::reconcile::is_duplicate_input;
use crate::types::{Part, PartContent, RenderPlan, WirePart};

/// Ordered parts of one assistant turn.
///
/// Parts are only ever appended; positions are assigned here and never
/// change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartStore {
    parts: Vec<Part>,
}

impl PartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// Append already-validated content, returning its position.
    pub fn append(&mut self, content: PartContent) -> usize {
        let position = self.parts.len();
        self.parts.push(Part::new(position, content));
        position
    }

    /// Validate and append a wire record.
    ///
    /// Malformed records are logged and dropped; the store is left unchanged.
    /// A repeated input for a known invocation is kept but logged, since plans
    /// ignore it.
    pub fn append_wire(&mut self, wire: WirePart) -> Result<usize> {
        let position = self.parts.len();
        match Part::from_wire(position, wire) {
            Ok(part) => {
                self.parts.push(part);
                if is_duplicate_input(&self.parts, position) {
                    if let Some(tool) = self.parts[position].as_tool() {
                        warn!(
                            position,
                            tool = %tool.tool,
                            call_id = %tool.call_id,
                            "duplicate input for an invocation already seen"
                        );
                    }
                }
                Ok(position)
            }
            Err(e) => {
                warn!(error = %e, "dropping malformed part");
                Err(e)
            }
        }
    }

    /// Parse one JSON record and append it.
    pub fn append_json(&mut self, line: &str) -> Result<usize> {
        let wire: WirePart = serde_json::from_str(line)?;
        self.append_wire(wire)
    }

    /// Render plan for the current contents, default configuration.
    pub fn plan(&self) -> RenderPlan {
        crate::plan::build_render_plan(&self.parts)
    }

    pub fn plan_with(&self, builder: &PlanBuilder) -> RenderPlan {
        builder.build(&self.parts)
    }
}

impl FromIterator<PartContent> for PartStore {
    fn from_iter<I: IntoIterator<Item = PartContent>>(iter: I) -> Self {
        let mut store = Self::new();
        for content in iter {
            store.append(content);
        }
        store
    }
}

impl Extend<PartContent> for PartStore {
    fn extend<I: IntoIterator<Item = PartContent>>(&mut self, iter: I) {
        for content in iter {
            self.append(content);
        }
    }
}

/// Turns a stream of wire parts into a stream of render plans.
///
/// One plan is yielded per accepted part. Recoverable upstream errors are
/// passed through and consumption continues; anything else ends the stream.
pub struct PlanTransform {
    builder: PlanBuilder,
}

impl PlanTransform {
    pub fn new(builder: PlanBuilder) -> Self {
        Self { builder }
    }

    pub fn transform(
        &self,
        stream: BoxStream<'static, Result<WirePart>>,
    ) -> BoxStream<'static, Result<RenderPlan>> {
        let builder = self.builder.clone();
        let transformed = async_stream::stream! {
            let mut store = PartStore::new();
            let mut inner = std::pin::pin!(stream);

            while let Some(item) = inner.next().await {
                match item {
                    Ok(wire) => {
                        if store.append_wire(wire).is_ok() {
                            yield Ok(store.plan_with(&builder));
                        }
                    }
                    Err(e) if e.is_recoverable() => {
                        warn!(error = %e, "skipping unreadable part");
                        yield Err(e);
                    }
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        };
        Box::pin(transformed)
    }
}

impl Default for PlanTransform {
    fn default() -> Self {
        Self::new(PlanBuilder::default())
    }
}

/// Convenience wrapper: `PlanTransform` with a default builder.
pub fn plan_stream(
    stream: BoxStream<'static, Result<WirePart>>,
) -> BoxStream<'static, Result<RenderPlan>> {
    PlanTransform::default().transform(stream)
}
