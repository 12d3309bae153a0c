//! turnplan: render plans for streamed assistant turns
//!
//! An assistant turn arrives as a flat, append-only sequence of parts: text,
//! reasoning, and the inputs and outputs of tool calls, each delivered as a
//! separate event. This crate reconciles that sequence into an ordered list of
//! render units, pairing tool inputs with their outputs, folding repeated
//! calls of groupable tools into one panel, and skipping records already
//! represented elsewhere.
//!
//! The plan is recomputed from scratch on every growth of the sequence and is
//! prefix-consistent: a unit, once anchored, never moves or changes type.
//!
//! # Quick Start
//!
//! ```
//! use turnplan::prelude::*;
//! use serde_json::json;
//!
//! let mut store = PartStore::new();
//! store.append(PartContent::text("Looking for datasets..."));
//! store.append(PartContent::tool_input("searchDatasets", "a", json!({"q": "energy"})));
//! assert!(store.plan().is_loading());
//!
//! store.append(PartContent::tool_output("searchDatasets", "a", json!({"results": []})));
//! let plan = store.plan();
//! assert_eq!(plan.len(), 2);
//! assert!(!plan.is_loading());
//! ```

pub mod config;
pub mod error;
pub mod grouping;
pub mod plan;
pub mod prelude;
pub mod reconcile;
pub mod store;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
