use std::fmt;
use thiserror::Error;

/// How serious a finding is. Issues never abort the pipeline on their own;
/// hosts decide what each level means for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A non-fatal finding gathered during conversion, override merging, or
/// validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Issue {
    #[error("No schema available for node '{node_id}' of type '{class_type}'; checks skipped")]
    SchemaUnavailable { node_id: u64, class_type: String },

    #[error("Node '{node_id}': required input '{input}' recovered from widget '{from}'")]
    WidgetReassigned {
        node_id: u64,
        input: String,
        from: String,
    },

    #[error("Node '{node_id}': required input '{input}' filled from widget value {index}")]
    WidgetClaimed {
        node_id: u64,
        input: String,
        index: usize,
    },

    #[error("Node '{node_id}': input slot {slot} is connected but has no name; connection dropped")]
    UnnamedSlot { node_id: u64, slot: usize },

    #[error("Node '{node_id}': input '{input}' uses link {link_id}, which does not exist")]
    UnresolvedLink {
        node_id: u64,
        input: String,
        link_id: u64,
    },

    #[error("Override key '{key}' matches no node id or title; skipped")]
    UnresolvedOverrideKey { key: String },

    #[error("Node '{node_id}' ({class_type}) is missing required input '{input}'")]
    MissingRequiredInput {
        node_id: u64,
        class_type: String,
        input: String,
    },

    #[error("Node '{node_id}' ({class_type}): missing '{input}' filled with default '{value}'")]
    DefaultFilled {
        node_id: u64,
        class_type: String,
        input: String,
        value: String,
    },

    #[error("Node '{node_id}': input '{input}' references node '{target}', which is not in the workflow")]
    DanglingReference {
        node_id: u64,
        input: String,
        target: u64,
    },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::SchemaUnavailable { .. } => Severity::Info,
            Issue::DanglingReference { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}
