//! Tests for schema validation and the save-node default fill.
use henkan::prelude::*;
use serde_json::json;

#[test]
fn test_missing_required_input_is_reported() {
    let schemas = SchemaCache::from_object_info(&json!({
        "CLIPTextEncode": {
            "input": { "required": { "text": ["STRING"], "clip": ["CLIP"] } }
        }
    }));
    let mut workflow = ApiWorkflow::default();
    let mut node = ApiNode::new("CLIPTextEncode", "CLIPTextEncode");
    node.inputs.insert("text".to_string(), InputValue::literal("hello"));
    workflow.nodes.insert(2, node);

    let issues = validate(&mut workflow, &schemas);

    assert_eq!(
        issues,
        vec![Issue::MissingRequiredInput {
            node_id: 2,
            class_type: "CLIPTextEncode".to_string(),
            input: "clip".to_string(),
        }]
    );
    assert_eq!(issues[0].severity(), Severity::Warning);
}

#[test]
fn test_save_node_prefix_is_filled_without_schema() {
    let schemas = SchemaCache::new();
    let mut workflow = ApiWorkflow::default();
    workflow.nodes.insert(7, ApiNode::new("SaveImage", "SaveImage"));

    let issues = validate(&mut workflow, &schemas);

    let node = workflow.get(7).expect("Node 7 missing");
    assert_eq!(
        node.inputs.get("filename_prefix"),
        Some(&InputValue::literal("ComfyUI"))
    );
    assert!(issues.contains(&Issue::DefaultFilled {
        node_id: 7,
        class_type: "SaveImage".to_string(),
        input: "filename_prefix".to_string(),
        value: "ComfyUI".to_string(),
    }));
}

#[test]
fn test_filled_prefix_is_not_reported_missing() {
    // The fill runs before the required check, so the fresh value counts.
    let schemas = SchemaCache::from_object_info(&json!({
        "SaveImage": {
            "input": { "required": { "filename_prefix": ["STRING"] } }
        }
    }));
    let mut workflow = ApiWorkflow::default();
    workflow.nodes.insert(7, ApiNode::new("SaveImage", "SaveImage"));

    let issues = validate(&mut workflow, &schemas);

    assert_eq!(
        issues,
        vec![Issue::DefaultFilled {
            node_id: 7,
            class_type: "SaveImage".to_string(),
            input: "filename_prefix".to_string(),
            value: "ComfyUI".to_string(),
        }]
    );
}

#[test]
fn test_existing_prefix_is_left_alone() {
    let schemas = SchemaCache::new();
    let mut workflow = ApiWorkflow::default();
    let mut node = ApiNode::new("SaveImage", "SaveImage");
    node.inputs.insert(
        "filename_prefix".to_string(),
        InputValue::literal("my_run"),
    );
    workflow.nodes.insert(7, node);

    let issues = validate(&mut workflow, &schemas);

    let node = workflow.get(7).expect("Node 7 missing");
    assert_eq!(
        node.inputs.get("filename_prefix"),
        Some(&InputValue::literal("my_run"))
    );
    assert!(!issues
        .iter()
        .any(|issue| matches!(issue, Issue::DefaultFilled { .. })));
}

#[test]
fn test_unknown_class_downgrades_to_info() {
    let schemas = SchemaCache::new();
    let mut workflow = ApiWorkflow::default();
    workflow.nodes.insert(1, ApiNode::new("MysteryNode", "MysteryNode"));

    let issues = validate(&mut workflow, &schemas);

    assert_eq!(
        issues,
        vec![Issue::SchemaUnavailable {
            node_id: 1,
            class_type: "MysteryNode".to_string(),
        }]
    );
    assert_eq!(issues[0].severity(), Severity::Info);
}

#[test]
fn test_dangling_reference_is_an_error() {
    let schemas = SchemaCache::new();
    let mut workflow = ApiWorkflow::default();
    let mut node = ApiNode::new("VAEDecode", "VAEDecode");
    node.inputs.insert("samples".to_string(), InputValue::reference(99, 0));
    workflow.nodes.insert(6, node);

    let issues = validate(&mut workflow, &schemas);

    assert!(issues.contains(&Issue::DanglingReference {
        node_id: 6,
        input: "samples".to_string(),
        target: 99,
    }));
    let dangling = issues
        .iter()
        .find(|issue| matches!(issue, Issue::DanglingReference { .. }))
        .expect("DanglingReference missing");
    assert_eq!(dangling.severity(), Severity::Error);
}

#[test]
fn test_valid_reference_passes() {
    let schemas = SchemaCache::new();
    let mut workflow = ApiWorkflow::default();
    workflow.nodes.insert(1, ApiNode::new("CheckpointLoaderSimple", "Loader"));
    let mut consumer = ApiNode::new("VAEDecode", "VAEDecode");
    consumer.inputs.insert("vae".to_string(), InputValue::reference(1, 2));
    workflow.nodes.insert(6, consumer);

    let issues = validate(&mut workflow, &schemas);

    assert!(!issues
        .iter()
        .any(|issue| matches!(issue, Issue::DanglingReference { .. })));
}

#[test]
fn test_fully_covered_workflow_yields_no_issues() {
    let schemas = SchemaCache::from_object_info(&json!({
        "CheckpointLoaderSimple": {
            "input": { "required": { "ckpt_name": [["v1-5.safetensors"]] } }
        },
        "CLIPTextEncode": {
            "input": { "required": { "text": ["STRING"], "clip": ["CLIP"] } }
        }
    }));
    let mut workflow = ApiWorkflow::default();

    let mut loader = ApiNode::new("CheckpointLoaderSimple", "Loader");
    loader.inputs.insert(
        "ckpt_name".to_string(),
        InputValue::literal("v1-5.safetensors"),
    );
    workflow.nodes.insert(1, loader);

    let mut encode = ApiNode::new("CLIPTextEncode", "Prompt");
    encode.inputs.insert("text".to_string(), InputValue::literal("hello"));
    encode.inputs.insert("clip".to_string(), InputValue::reference(1, 1));
    workflow.nodes.insert(2, encode);

    let issues = validate(&mut workflow, &schemas);

    assert!(issues.is_empty());
}
