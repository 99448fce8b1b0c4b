use crate::error::ConvertError;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// The flattened, execution-addressed form of a workflow.
///
/// Serializes as a JSON object keyed by the decimal node id; the `BTreeMap`
/// keys keep both serialization and iteration in ascending numeric order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ApiWorkflow {
    pub nodes: BTreeMap<u64, ApiNode>,
}

impl ApiWorkflow {
    /// Parses an already-converted workflow from its wire JSON.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        serde_json::from_str(json).map_err(|e| ConvertError::JsonParseError(e.to_string()))
    }

    pub fn get(&self, id: u64) -> Option<&ApiNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One node in the API form: named inputs plus type and display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiNode {
    pub inputs: BTreeMap<String, InputValue>,
    pub class_type: String,
    #[serde(rename = "_meta", default)]
    pub meta: NodeMeta,
}

impl ApiNode {
    pub fn new(class_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            inputs: BTreeMap::new(),
            class_type: class_type.into(),
            meta: NodeMeta {
                title: title.into(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }
}

/// Display metadata carried alongside a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeMeta {
    #[serde(default)]
    pub title: String,
}

/// A single input on an [`ApiNode`]: a literal JSON value, or a reference to
/// another node's output slot.
///
/// References serialize as `["<producer-id>", slot]`, the two-element form
/// the execution engine expects. The tagged representation exists so that
/// downstream passes can match on the kind instead of probing JSON shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Literal(serde_json::Value),
    Reference { node: u64, slot: u32 },
}

impl InputValue {
    /// Classifies a raw JSON value. The engine's `["<node-id>", slot]`
    /// two-element shape becomes a reference; everything else stays literal.
    pub fn from_value(value: serde_json::Value) -> Self {
        if let serde_json::Value::Array(items) = &value {
            if let [serde_json::Value::String(node), serde_json::Value::Number(slot)] =
                items.as_slice()
            {
                let slot = slot.as_u64().and_then(|s| u32::try_from(s).ok());
                if let (Ok(node), Some(slot)) = (node.parse::<u64>(), slot) {
                    return InputValue::Reference { node, slot };
                }
            }
        }
        InputValue::Literal(value)
    }

    pub fn literal(value: impl Into<serde_json::Value>) -> Self {
        InputValue::Literal(value.into())
    }

    pub fn reference(node: u64, slot: u32) -> Self {
        InputValue::Reference { node, slot }
    }

    pub fn as_literal(&self) -> Option<&serde_json::Value> {
        match self {
            InputValue::Literal(value) => Some(value),
            InputValue::Reference { .. } => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, InputValue::Reference { .. })
    }
}

impl Serialize for InputValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            InputValue::Literal(value) => value.serialize(serializer),
            InputValue::Reference { node, slot } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&node.to_string())?;
                seq.serialize_element(slot)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(InputValue::from_value(value))
    }
}
