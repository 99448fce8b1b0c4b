//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the henkan crate.
//! Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use henkan::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Load the editor workflow and the engine's introspection document
//! let workflow_json = std::fs::read_to_string("path/to/workflow.json")?;
//! let object_info_json = std::fs::read_to_string("path/to/object_info.json")?;
//!
//! let workflow = UiWorkflow::from_json(&workflow_json)?;
//! let schemas = SchemaCache::from_object_info(&serde_json::from_str(&object_info_json)?);
//!
//! // Convert, merge overrides, validate
//! let overrides = ParamOverrides::from_json(r#"{"Sampler": {"steps": 30}}"#)?;
//! let converter = GraphConverter::new(&schemas);
//! let outcome = converter.compile(&workflow, Some(&overrides))?;
//!
//! for issue in &outcome.issues {
//!     eprintln!("[{}] {}", issue.severity(), issue);
//! }
//! println!("{}", serde_json::to_string_pretty(&outcome.workflow)?);
//! # Ok(())
//! # }
//! ```

// Conversion pipeline
pub use crate::convert::{ConversionOutcome, GraphConverter, GraphConverterBuilder, LinkResolver};
pub use crate::merge::{ParamOverrides, merge_overrides, update_field};
pub use crate::validate::validate;

// Graph models
pub use crate::graph::api::{ApiNode, ApiWorkflow, InputValue, NodeMeta};
pub use crate::graph::ui::{
    InputSlot, SAVE_RESTORE_TITLE, UiLink, UiNode, UiWorkflow, WidgetBinding,
};

// Schemas
pub use crate::schema::{NodeSchema, SchemaCache};

// Diagnostics and error types
pub use crate::diagnostics::{Issue, Severity};
pub use crate::error::ConvertError;

// Standard library re-exports commonly used with this crate
pub use std::collections::BTreeMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
