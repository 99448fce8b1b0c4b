use crate::diagnostics::Issue;
use crate::error::ConvertError;
use crate::graph::api::{ApiWorkflow, InputValue};
use ahash::AHashMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-request parameter overrides: node id or title, to input name, to
/// value. Built by the caller, never modified by the merge.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ParamOverrides {
    pub nodes: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ParamOverrides {
    /// Parses overrides from their wire JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        serde_json::from_str(json).map_err(|e| ConvertError::JsonParseError(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Merges `overrides` into `workflow` in place.
///
/// Keys resolve as a literal node id first, then as a node title; the first
/// node in ascending id order wins on duplicate titles. Keys that resolve to
/// nothing are reported and skipped; merging itself never fails.
pub fn merge_overrides(workflow: &mut ApiWorkflow, overrides: &ParamOverrides) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut titles: AHashMap<String, u64> = AHashMap::new();
    for (id, node) in &workflow.nodes {
        titles.entry(node.title().to_string()).or_insert(*id);
    }

    for (key, fields) in &overrides.nodes {
        let Some(node_id) = resolve_key(workflow, &titles, key) else {
            log::warn!("override key '{}' matches no node id or title; skipped", key);
            issues.push(Issue::UnresolvedOverrideKey { key: key.clone() });
            continue;
        };
        let Some(node) = workflow.nodes.get_mut(&node_id) else {
            continue;
        };
        for (name, incoming) in fields {
            update_field(&mut node.inputs, name, incoming);
        }
    }

    issues
}

fn resolve_key(workflow: &ApiWorkflow, titles: &AHashMap<String, u64>, key: &str) -> Option<u64> {
    if let Ok(id) = key.parse::<u64>() {
        if workflow.nodes.contains_key(&id) {
            return Some(id);
        }
    }
    titles.get(key).copied()
}

/// Merges one incoming value into a node's inputs under `name`.
///
/// Array-shaped current values keep their auxiliary tail where possible: a
/// bare scalar replaces index 0 of a primitive-headed array, and a
/// one-element array replaces index 0 of a longer one. Everything else,
/// references included, is replaced wholesale.
pub fn update_field(inputs: &mut BTreeMap<String, InputValue>, name: &str, incoming: &Value) {
    let Some(current) = inputs.get_mut(name) else {
        inputs.insert(name.to_string(), InputValue::from_value(incoming.clone()));
        return;
    };

    if let InputValue::Literal(Value::Array(items)) = current {
        if is_primitive(incoming) && items.first().is_some_and(is_primitive) {
            items[0] = incoming.clone();
            return;
        }
        if let Value::Array(incoming_items) = incoming {
            if items.len() > 1 && incoming_items.len() == 1 {
                items[0] = incoming_items[0].clone();
                return;
            }
        }
    }

    *current = InputValue::from_value(incoming.clone());
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
