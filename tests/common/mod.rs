//! Shared test helpers.

#![allow(dead_code)]

use serde_json::{json, Value};
use turnplan::prelude::*;

pub fn turn(contents: Vec<PartContent>) -> Vec<Part> {
    contents.into_iter().collect::<PartStore>().into_parts()
}

pub fn search_in(call_id: &str, query: &str) -> PartContent {
    PartContent::tool_input("searchDatasets", call_id, json!({ "q": query }))
}

pub fn search_out(call_id: &str, results: usize) -> PartContent {
    let results: Vec<Value> = (0..results)
        .map(|i| json!({ "name": format!("dataset-{i}") }))
        .collect();
    PartContent::tool_output("searchDatasets", call_id, json!({ "results": results }))
}

/// A turn exercising every branch of the builder.
pub fn busy_turn() -> Vec<PartContent> {
    vec![
        PartContent::reasoning("The user wants energy data."),
        PartContent::text("Searching."),
        search_in("s1", "energy"),
        PartContent::tool_input("getDatasetDetails", "d1", json!({ "id": "energy-2024" })),
        search_in("s2", "power"),
        search_out("s1", 3),
        PartContent::reasoning("  "),
        PartContent::tool_output("getDatasetDetails", "d1", json!({ "title": "Energy 2024" })),
        PartContent::tool_input("createDocument", "c1", json!({ "title": "Report" })),
        PartContent::text("Drafting a report."),
        search_out("s2", 0),
        PartContent::tool_output("createDocument", "c1", json!({ "error": "permission denied" })),
        PartContent::tool_output("analyzeResource", "orphan", json!({ "rows": 12 })),
        PartContent::tool_input("updateDocument", "u1", json!({ "id": "doc-1" })),
        PartContent::text("Done."),
    ]
}

/// A turn with late outputs opening a run, orphan outputs followed by their
/// inputs, and a repeated input.
pub fn tangled_turn() -> Vec<PartContent> {
    vec![
        PartContent::text("Looking."),
        search_in("s1", "energy"),
        PartContent::text("Meanwhile."),
        search_out("s1", 2),
        search_in("s2", "power"),
        PartContent::tool_output("analyzeResource", "r1", json!({ "rows": 4 })),
        PartContent::tool_input("analyzeResource", "r1", json!({ "id": "res-1" })),
        PartContent::tool_input("createDocument", "c1", json!({ "n": 1 })),
        PartContent::tool_input("createDocument", "c1", json!({ "n": 2 })),
        PartContent::tool_output("createDocument", "c1", json!({ "id": "doc-1" })),
        search_out("s2", 1),
        PartContent::tool_output("getDatasetDetails", "d1", json!({ "title": "Energy" })),
        PartContent::tool_input("getDatasetDetails", "d1", json!({ "id": "energy" })),
        PartContent::text("Done."),
    ]
}
