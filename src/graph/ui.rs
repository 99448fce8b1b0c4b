use crate::error::ConvertError;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Property key under which the editor stores a node's save/restore name.
pub const SAVE_RESTORE_TITLE: &str = "Node name for S&R";

/// A workflow as saved by the node-graph editor.
///
/// Editor bookkeeping (`last_node_id`, `groups`, `extra`, ...) is ignored;
/// only nodes and links matter for conversion.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiWorkflow {
    #[serde(default)]
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub links: Vec<UiLink>,
}

impl UiWorkflow {
    /// Parses a workflow from the editor's saved JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        serde_json::from_str(json).map_err(|e| ConvertError::JsonParseError(e.to_string()))
    }
}

/// One node as placed in the editor.
#[derive(Debug, Deserialize, Clone)]
pub struct UiNode {
    pub id: u64,
    #[serde(rename = "type")]
    pub class_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "widgets_values")]
    pub widget_values: Vec<serde_json::Value>,
    #[serde(default)]
    pub inputs: Vec<InputSlot>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl UiNode {
    /// The node's display title: the explicit title if set, else the editor's
    /// save/restore name property, else the class type.
    pub fn resolved_title(&self) -> &str {
        if let Some(title) = &self.title {
            return title;
        }
        if let Some(serde_json::Value::String(name)) = self.properties.get(SAVE_RESTORE_TITLE) {
            return name;
        }
        &self.class_type
    }
}

/// A connectable input slot on a node.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputSlot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<u64>,
    #[serde(default)]
    pub widget: Option<WidgetBinding>,
}

/// Marker that a slot is a widget promoted to a connectable input.
#[derive(Debug, Deserialize, Clone)]
pub struct WidgetBinding {
    pub name: String,
}

/// A connection between two node slots.
///
/// The editor saves links as bare arrays: `[id, source_node, source_slot,
/// dest_node, dest_slot]` plus an optional trailing type string. Any other
/// shape is rejected at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct UiLink {
    pub id: u64,
    pub source_node: u64,
    pub source_slot: u32,
    pub dest_node: u64,
    pub dest_slot: u32,
    pub ty: Option<String>,
}

impl<'de> Deserialize<'de> for UiLink {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LinkVisitor;

        impl<'de> Visitor<'de> for LinkVisitor {
            type Value = UiLink;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a link array [id, source_node, source_slot, dest_node, dest_slot, type?]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<UiLink, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let id = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let source_node = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let source_slot = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let dest_node = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let dest_slot = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let ty = seq.next_element::<Option<String>>()?.flatten();
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("link array has more than 6 elements"));
                }
                Ok(UiLink {
                    id,
                    source_node,
                    source_slot,
                    dest_node,
                    dest_slot,
                    ty,
                })
            }
        }

        deserializer.deserialize_seq(LinkVisitor)
    }
}
