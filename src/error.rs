use thiserror::Error;

/// Errors that abort workflow conversion outright.
///
/// Only structurally unusable input is fatal; everything recoverable is
/// reported as an [`Issue`](crate::diagnostics::Issue) alongside the result.
#[derive(Error, Debug, Clone)]
pub enum ConvertError {
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(String),

    #[error("Node id '{id}' appears more than once in the workflow")]
    DuplicateNodeId { id: u64 },
}
