//! # Henkan - Workflow Graph Conversion Engine
//!
//! **Henkan** converts workflows saved by a visual node-graph editor into the
//! flattened, execution-addressed prompt format a generation engine runs.
//! In the editor's format, node parameters live in a positional
//! `widgets_values` list and connections are slot-indexed link rows; the
//! engine instead wants every input keyed by name, holding either a literal
//! value or an explicit `["producer-id", output-slot]` reference.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse the editor's saved JSON into a [`UiWorkflow`](graph::ui::UiWorkflow),
//!     and (once per process) feed the engine's introspection document to a
//!     [`SchemaCache`](schema::SchemaCache). An empty cache is fine; naming then
//!     falls back to a table of well-known widget layouts and `param_{i}` names.
//! 2.  **Convert**: A [`GraphConverter`](convert::GraphConverter) flattens the
//!     graph, mapping widget values to named inputs and overlaying references
//!     from the link table.
//! 3.  **Merge**: Caller overrides, keyed by node id or title, are merged
//!     field by field with array-preserving semantics ([`merge`]).
//! 4.  **Validate**: The result is checked against the schemas ([`validate`]);
//!     anything recoverable along the way is reported as an
//!     [`Issue`](diagnostics::Issue), never thrown.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use henkan::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let workflow_json = std::fs::read_to_string("workflow.json")?;
//!     let workflow = UiWorkflow::from_json(&workflow_json)?;
//!
//!     // The host fetches the engine's introspection document ahead of time;
//!     // populate() degrades to an empty cache on junk input.
//!     let schemas = SchemaCache::new();
//!     if let Ok(doc) = std::fs::read_to_string("object_info.json") {
//!         schemas.populate(&serde_json::from_str(&doc)?);
//!     }
//!
//!     let converter = GraphConverter::builder(&schemas)
//!         .with_widget_names("MyCustomLoader", ["model_path"])
//!         .build();
//!
//!     let overrides = ParamOverrides::from_json(r#"{"3": {"steps": 30}}"#)?;
//!     let outcome = converter.compile(&workflow, Some(&overrides))?;
//!
//!     for issue in &outcome.issues {
//!         eprintln!("[{}] {}", issue.severity(), issue);
//!     }
//!     println!("{}", serde_json::to_string_pretty(&outcome.workflow)?);
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod merge;
pub mod prelude;
pub mod schema;
pub mod validate;

#[cfg(feature = "python-bindings")]
mod python;
