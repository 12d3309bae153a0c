//! Tests for the part store and the streaming plan adapter.

mod common;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use turnplan::prelude::*;

fn wire(value: serde_json::Value) -> Result<WirePart> {
    Ok(serde_json::from_value(value)?)
}

#[tokio::test]
async fn one_plan_per_accepted_part() {
    let stream = async_stream::stream! {
        yield wire(json!({"kind": "text", "text": "Searching."}));
        yield wire(json!({"kind": "tool:searchDatasets", "callId": "a", "phase": "input-available", "payload": {"q": "energy"}}));
        yield wire(json!({"kind": "tool:searchDatasets", "callId": "a", "phase": "output-available", "payload": {"results": [1, 2, 3]}}));
    };

    let plans: Vec<RenderPlan> = plan_stream(Box::pin(stream))
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].len(), 1);
    assert!(plans[1].is_loading());
    assert!(!plans[2].is_loading());
    assert_eq!(plans[2].anchors(), vec![0, 1]);
}

#[test]
fn ai_sdk_tool_records_keep_input_and_error_output() {
    let mut store = PartStore::new();
    store
        .append_json(r#"{"type":"tool-createDocument","toolCallId":"a","state":"input-available","input":{"title":"Report"}}"#)
        .unwrap();
    store
        .append_json(r#"{"type":"tool-createDocument","toolCallId":"a","state":"output-available","input":{"title":"Report"},"output":{"error":"permission denied"}}"#)
        .unwrap();

    let plan = store.plan();
    assert_eq!(plan.len(), 1);
    let invocation = plan.invocations().next().unwrap();
    assert_eq!(invocation.input, Some(json!({"title": "Report"})));
    assert!(matches!(invocation.state, InvocationState::Errored { .. }));
    assert_eq!(invocation.error_message(), Some("permission denied"));
    assert_eq!(plan.errors().count(), 1);
}

#[test]
fn duplicate_input_is_accepted_but_rendered_once() {
    let mut store = PartStore::new();
    let first = WirePart::tool("createDocument", "a", ToolPhase::InputAvailable, json!({"n": 1}));
    let second = WirePart::tool("createDocument", "a", ToolPhase::InputAvailable, json!({"n": 2}));
    assert_eq!(store.append_wire(first).unwrap(), 0);
    assert_eq!(store.append_wire(second).unwrap(), 1);

    let plan = store.plan();
    assert_eq!(plan.anchors(), vec![0]);
    assert_eq!(plan.invocations().next().unwrap().input, Some(json!({"n": 1})));
}

#[tokio::test]
async fn malformed_parts_are_dropped_silently() {
    let stream = async_stream::stream! {
        yield wire(json!({"kind": "tool:createDocument", "phase": "input-available"}));
        yield wire(json!({"kind": "text", "text": "Hallo"}));
    };

    let plans: Vec<_> = plan_stream(Box::pin(stream)).collect().await;
    assert_eq!(plans.len(), 1);
    let plan = plans[0].as_ref().unwrap();
    assert_eq!(plan.anchors(), vec![0]);
}

#[tokio::test]
async fn recoverable_errors_pass_through() {
    let stream = async_stream::stream! {
        yield Err(TurnPlanError::Serialization(
            serde_json::from_str::<WirePart>("{oops").unwrap_err(),
        ));
        yield wire(json!({"kind": "text", "text": "still here"}));
    };

    let items: Vec<_> = plan_stream(Box::pin(stream)).collect().await;
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Err(TurnPlanError::Serialization(_))));
    assert!(items[1].is_ok());
}

#[tokio::test]
async fn io_errors_end_the_stream() {
    let stream = async_stream::stream! {
        yield wire(json!({"kind": "text", "text": "first"}));
        yield Err(TurnPlanError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")));
        yield wire(json!({"kind": "text", "text": "never seen"}));
    };

    let items: Vec<_> = plan_stream(Box::pin(stream)).collect().await;
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    assert!(matches!(items[1], Err(TurnPlanError::Io(_))));
}

#[tokio::test]
async fn transform_uses_configured_builder() {
    let stream = async_stream::stream! {
        yield wire(json!({"kind": "tool:searchDatasets", "callId": "a", "phase": "input-available"}));
        yield wire(json!({"kind": "tool:searchDatasets", "callId": "b", "phase": "input-available"}));
    };

    let config = PlanConfig::builder()
        .groupable(Default::default())
        .build();
    let transform = PlanTransform::new(PlanBuilder::new(config));
    let last = transform
        .transform(Box::pin(stream))
        .collect::<Vec<_>>()
        .await
        .pop()
        .unwrap()
        .unwrap();
    let kinds: Vec<_> = last.iter().map(RenderUnit::kind).collect();
    assert_eq!(kinds, vec!["single_tool", "single_tool"]);
}

#[test]
fn store_plan_matches_pure_builder() {
    let store: PartStore = common::busy_turn().into_iter().collect();
    assert_eq!(store.plan(), build_render_plan(store.parts()));
}

#[test]
fn wire_constructor_round_trips_through_store() {
    let mut store = PartStore::new();
    store.append_wire(WirePart::text("Hallo")).unwrap();
    store
        .append_wire(WirePart::tool(
            "createDocument",
            "a",
            ToolPhase::InputAvailable,
            json!({"title": "Report"}),
        ))
        .unwrap();
    store
        .append_wire(WirePart::tool(
            "createDocument",
            "a",
            ToolPhase::OutputAvailable,
            json!({"error": "permission denied"}),
        ))
        .unwrap();

    let plan = store.plan();
    assert_eq!(plan.anchors(), vec![0, 1]);
    assert_eq!(
        plan.errors().next().and_then(Invocation::error_message),
        Some("permission denied")
    );
}
