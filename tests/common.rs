//! Common test utilities for building workflows and schema documents.
use henkan::prelude::*;
use serde_json::{Value, json};

/// A UI node with no slots, widgets, or title.
#[allow(dead_code)]
pub fn bare_node(id: u64, class_type: &str) -> UiNode {
    UiNode {
        id,
        class_type: class_type.to_string(),
        title: None,
        widget_values: vec![],
        inputs: vec![],
        properties: serde_json::Map::new(),
    }
}

/// A UI node carrying positional widget values.
#[allow(dead_code)]
pub fn widget_node(id: u64, class_type: &str, values: Vec<Value>) -> UiNode {
    UiNode {
        widget_values: values,
        ..bare_node(id, class_type)
    }
}

/// An input slot wired to a link id.
#[allow(dead_code)]
pub fn linked_slot(name: &str, link: u64) -> InputSlot {
    InputSlot {
        name: Some(name.to_string()),
        link: Some(link),
        widget: None,
    }
}

/// An input slot marking a widget promoted to a connectable input.
#[allow(dead_code)]
pub fn bound_slot(name: &str, widget_name: &str) -> InputSlot {
    InputSlot {
        name: Some(name.to_string()),
        link: None,
        widget: Some(WidgetBinding {
            name: widget_name.to_string(),
        }),
    }
}

/// A link row: `[id, source_node, source_slot, dest_node, dest_slot]`.
#[allow(dead_code)]
pub fn link(
    id: u64,
    source_node: u64,
    source_slot: u32,
    dest_node: u64,
    dest_slot: u32,
) -> UiLink {
    UiLink {
        id,
        source_node,
        source_slot,
        dest_node,
        dest_slot,
        ty: None,
    }
}

/// The classic text-to-image workflow: checkpoint loader, two prompt
/// encoders, an empty latent, a sampler titled "Sampler", a decoder, and a
/// save node.
#[allow(dead_code)]
pub fn text_to_image_workflow() -> UiWorkflow {
    let mut positive = widget_node(2, "CLIPTextEncode", vec![json!("masterpiece, best quality")]);
    positive.inputs = vec![linked_slot("clip", 1)];

    let mut negative = widget_node(3, "CLIPTextEncode", vec![json!("lowres, bad anatomy")]);
    negative.inputs = vec![linked_slot("clip", 2)];

    let mut sampler = widget_node(
        5,
        "KSampler",
        vec![
            json!(42),
            json!("randomize"),
            json!(20),
            json!(8.0),
            json!("euler"),
            json!("normal"),
            json!(1.0),
        ],
    );
    sampler.title = Some("Sampler".to_string());
    sampler.inputs = vec![
        linked_slot("model", 3),
        linked_slot("positive", 4),
        linked_slot("negative", 5),
        linked_slot("latent_image", 6),
    ];

    let mut decode = bare_node(6, "VAEDecode");
    decode.inputs = vec![linked_slot("samples", 7), linked_slot("vae", 8)];

    let mut save = widget_node(7, "SaveImage", vec![json!("ComfyUI")]);
    save.inputs = vec![linked_slot("images", 9)];

    UiWorkflow {
        nodes: vec![
            widget_node(
                1,
                "CheckpointLoaderSimple",
                vec![json!("v1-5-pruned-emaonly.safetensors")],
            ),
            positive,
            negative,
            widget_node(4, "EmptyLatentImage", vec![json!(512), json!(512), json!(1)]),
            sampler,
            decode,
            save,
        ],
        links: vec![
            link(1, 1, 1, 2, 0),
            link(2, 1, 1, 3, 0),
            link(3, 1, 0, 5, 0),
            link(4, 2, 0, 5, 1),
            link(5, 3, 0, 5, 2),
            link(6, 4, 0, 5, 3),
            link(7, 5, 0, 6, 0),
            link(8, 1, 2, 6, 1),
            link(9, 6, 0, 7, 0),
        ],
    }
}

/// An introspection document covering the text-to-image classes. The sampler
/// is deliberately absent so its widgets exercise the built-in table.
#[allow(dead_code)]
pub fn text_to_image_object_info() -> Value {
    json!({
        "CheckpointLoaderSimple": {
            "input": {
                "required": { "ckpt_name": [["v1-5-pruned-emaonly.safetensors"]] }
            }
        },
        "CLIPTextEncode": {
            "input": {
                "required": {
                    "text": ["STRING", { "multiline": true }],
                    "clip": ["CLIP"]
                }
            }
        },
        "EmptyLatentImage": {
            "input": {
                "required": {
                    "width": ["INT", { "default": 512 }],
                    "height": ["INT", { "default": 512 }],
                    "batch_size": ["INT", { "default": 1 }]
                }
            }
        },
        "VAEDecode": {
            "input": {
                "required": { "samples": ["LATENT"], "vae": ["VAE"] }
            }
        },
        "SaveImage": {
            "input": {
                "required": {
                    "images": ["IMAGE"],
                    "filename_prefix": ["STRING", { "default": "ComfyUI" }]
                }
            }
        }
    })
}
