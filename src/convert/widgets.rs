use crate::diagnostics::Issue;
use crate::graph::ui::UiNode;
use crate::schema::NodeSchema;
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;

/// Widget-name layout for one class: one entry per widget index. `None`
/// marks a widget the editor consumes itself, with no engine input behind it.
pub type WidgetNames = Vec<Option<String>>;

/// The shipped widget layouts for ubiquitous node types. Consulted only when
/// no schema entry exists for the class; extensible through the converter
/// builder.
pub(crate) fn default_widget_table() -> AHashMap<String, WidgetNames> {
    let entries: [(&str, &[Option<&str>]); 6] = [
        ("CheckpointLoaderSimple", &[Some("ckpt_name")]),
        ("CLIPTextEncode", &[Some("text")]),
        (
            "EmptyLatentImage",
            &[Some("width"), Some("height"), Some("batch_size")],
        ),
        // Index 1 is the editor's control-after-generate widget, which is
        // not an engine input.
        (
            "KSampler",
            &[
                Some("seed"),
                None,
                Some("steps"),
                Some("cfg"),
                Some("sampler_name"),
                Some("scheduler"),
                Some("denoise"),
            ],
        ),
        ("SaveImage", &[Some("filename_prefix")]),
        ("LoadImage", &[Some("image")]),
    ];
    entries
        .into_iter()
        .map(|(class, names)| {
            (
                class.to_string(),
                names.iter().map(|name| name.map(str::to_string)).collect(),
            )
        })
        .collect()
}

/// Maps a node's positional widget values to named inputs.
///
/// Per value index, the name comes from the first of: the node's own
/// widget-bound slot names, the schema's required-then-optional order, the
/// widget-name table, or a synthetic `param_{i}`. A repair pass then
/// recovers schema-required names the positional pass missed. Returns
/// `(name, value)` pairs in widget order; values without a name (skip slots)
/// are dropped.
pub(crate) fn map_widgets(
    node: &UiNode,
    schema: Option<&NodeSchema>,
    table: &AHashMap<String, WidgetNames>,
    issues: &mut Vec<Issue>,
) -> Vec<(String, Value)> {
    let widget_bound: Vec<&str> = node
        .inputs
        .iter()
        .filter_map(|slot| slot.widget.as_ref())
        .map(|binding| binding.name.as_str())
        .collect();
    let table_names = table.get(&node.class_type);

    let mut names: Vec<Option<String>> = Vec::with_capacity(node.widget_values.len());
    // A value is "claimed" once a declared name has consumed it; synthetic
    // and skipped values stay up for grabs in the repair pass.
    let mut claimed = vec![false; node.widget_values.len()];

    for index in 0..node.widget_values.len() {
        let (name, fixed) = resolve_name(schema, table_names, &widget_bound, index);
        names.push(name);
        claimed[index] = fixed;
    }

    if let Some(schema) = schema {
        repair_missing_required(node, schema, &mut names, &mut claimed, issues);
    }

    names
        .into_iter()
        .zip(node.widget_values.iter())
        .filter_map(|(name, value)| name.map(|name| (name, value.clone())))
        .collect()
}

fn resolve_name(
    schema: Option<&NodeSchema>,
    table_names: Option<&WidgetNames>,
    widget_bound: &[&str],
    index: usize,
) -> (Option<String>, bool) {
    if let Some(name) = widget_bound.get(index) {
        return (Some((*name).to_string()), true);
    }
    if let Some(schema) = schema {
        if let Some(name) = schema.name_at(index) {
            return (Some(name.to_string()), true);
        }
    } else if let Some(names) = table_names {
        if let Some(entry) = names.get(index) {
            return (entry.clone(), entry.is_some());
        }
    }
    (Some(format!("param_{index}")), false)
}

/// Best-effort recovery of schema-required names the positional pass missed:
/// first by case-insensitive substring match against assigned names, then by
/// consuming the next unclaimed value. Never aborts; every repair is
/// reported.
fn repair_missing_required(
    node: &UiNode,
    schema: &NodeSchema,
    names: &mut [Option<String>],
    claimed: &mut [bool],
    issues: &mut Vec<Issue>,
) {
    for required in &schema.required {
        if names.iter().flatten().any(|name| name == required) {
            continue;
        }

        let required_lower = required.to_lowercase();
        let substring_match = names
            .iter()
            .find_position(|name| {
                name.as_ref().is_some_and(|name| {
                    name.to_lowercase().contains(&required_lower)
                        && !schema.required.iter().any(|other| other == name)
                })
            })
            .map(|(index, _)| index);

        if let Some(index) = substring_match {
            let from = names[index].replace(required.clone()).unwrap_or_default();
            claimed[index] = true;
            log::debug!(
                "node {}: required input '{}' recovered from widget '{}'",
                node.id,
                required,
                from
            );
            issues.push(Issue::WidgetReassigned {
                node_id: node.id,
                input: required.clone(),
                from,
            });
        } else if let Some(index) = claimed.iter().position(|claimed| !claimed) {
            names[index] = Some(required.clone());
            claimed[index] = true;
            log::debug!(
                "node {}: required input '{}' filled from widget value {}",
                node.id,
                required,
                index
            );
            issues.push(Issue::WidgetClaimed {
                node_id: node.id,
                input: required.clone(),
                index,
            });
        }
    }
}
