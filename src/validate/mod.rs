use crate::diagnostics::Issue;
use crate::graph::api::{ApiWorkflow, InputValue};
use crate::schema::SchemaCache;
use itertools::Itertools;
use serde_json::Value;

/// Node type whose missing output-prefix input is filled rather than just
/// reported, with the engine's stock prefix.
const SAVE_IMAGE_CLASS: &str = "SaveImage";
const FILENAME_PREFIX_INPUT: &str = "filename_prefix";
const DEFAULT_FILENAME_PREFIX: &str = "ComfyUI";

/// Checks a converted workflow against the available schemas.
///
/// Findings are reported, not thrown, so a partially-correct workflow stays
/// inspectable. The one mutation is the save-node default fill; it too is
/// recorded as an issue.
pub fn validate(workflow: &mut ApiWorkflow, schemas: &SchemaCache) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (id, node) in workflow.nodes.iter_mut() {
        if node.class_type == SAVE_IMAGE_CLASS && !node.inputs.contains_key(FILENAME_PREFIX_INPUT)
        {
            node.inputs.insert(
                FILENAME_PREFIX_INPUT.to_string(),
                InputValue::Literal(Value::from(DEFAULT_FILENAME_PREFIX)),
            );
            issues.push(Issue::DefaultFilled {
                node_id: *id,
                class_type: node.class_type.clone(),
                input: FILENAME_PREFIX_INPUT.to_string(),
                value: DEFAULT_FILENAME_PREFIX.to_string(),
            });
        }

        let Some(schema) = schemas.get(&node.class_type) else {
            issues.push(Issue::SchemaUnavailable {
                node_id: *id,
                class_type: node.class_type.clone(),
            });
            continue;
        };

        let missing: Vec<&String> = schema
            .required
            .iter()
            .filter(|name| !node.inputs.contains_key(name.as_str()))
            .collect();
        if !missing.is_empty() {
            log::warn!(
                "node {} ({}) is missing required inputs: {}",
                id,
                node.class_type,
                missing.iter().join(", ")
            );
        }
        for name in missing {
            issues.push(Issue::MissingRequiredInput {
                node_id: *id,
                class_type: node.class_type.clone(),
                input: name.clone(),
            });
        }
    }

    for (id, node) in &workflow.nodes {
        for (input, value) in &node.inputs {
            if let InputValue::Reference { node: target, .. } = value {
                if !workflow.nodes.contains_key(target) {
                    issues.push(Issue::DanglingReference {
                        node_id: *id,
                        input: input.clone(),
                        target: *target,
                    });
                }
            }
        }
    }

    issues
}
