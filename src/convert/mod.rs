use crate::diagnostics::{Issue, Severity};
use crate::error::ConvertError;
use crate::graph::api::{ApiNode, ApiWorkflow, InputValue, NodeMeta};
use crate::graph::ui::{UiNode, UiWorkflow};
use crate::merge::{self, ParamOverrides};
use crate::schema::SchemaCache;
use crate::validate;
use ahash::AHashMap;
use std::collections::BTreeMap;

pub mod links;
mod widgets;

pub use links::LinkResolver;
pub use widgets::WidgetNames;

/// What a conversion produced: the API workflow plus every non-fatal finding
/// gathered along the way.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub workflow: ApiWorkflow,
    pub issues: Vec<Issue>,
}

impl ConversionOutcome {
    /// True if any accumulated issue carries error severity.
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity() == Severity::Error)
    }
}

/// Converts editor workflows into their execution-addressed API form.
///
/// Construction follows the builder pattern so hosts can extend the
/// widget-name table for node types the shipped table does not know:
///
/// ```rust
/// use henkan::convert::GraphConverter;
/// use henkan::schema::SchemaCache;
///
/// let schemas = SchemaCache::new();
/// let converter = GraphConverter::builder(&schemas)
///     .with_widget_names("MyLoader", ["model_path"])
///     .build();
/// ```
pub struct GraphConverter<'a> {
    schemas: &'a SchemaCache,
    widget_table: AHashMap<String, WidgetNames>,
}

pub struct GraphConverterBuilder<'a> {
    schemas: &'a SchemaCache,
    widget_table: AHashMap<String, WidgetNames>,
}

impl<'a> GraphConverterBuilder<'a> {
    pub fn new(schemas: &'a SchemaCache) -> Self {
        Self {
            schemas,
            widget_table: widgets::default_widget_table(),
        }
    }

    /// Registers widget names for a class the shipped table does not cover,
    /// or replaces an existing entry. Like the shipped entries, the names
    /// are consulted only when no schema entry exists for the class.
    pub fn with_widget_names<I, S>(mut self, class_type: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.widget_table.insert(
            class_type.to_string(),
            names.into_iter().map(|name| Some(name.into())).collect(),
        );
        self
    }

    pub fn build(self) -> GraphConverter<'a> {
        GraphConverter {
            schemas: self.schemas,
            widget_table: self.widget_table,
        }
    }
}

impl<'a> GraphConverter<'a> {
    pub fn builder(schemas: &'a SchemaCache) -> GraphConverterBuilder<'a> {
        GraphConverterBuilder::new(schemas)
    }

    /// A converter with the shipped widget-name table.
    pub fn new(schemas: &'a SchemaCache) -> Self {
        Self::builder(schemas).build()
    }

    /// Converts an editor workflow into its execution-addressed form.
    ///
    /// One API node per UI node, keyed by id. Fails only on structural
    /// problems; everything recoverable becomes an [`Issue`] in the outcome.
    pub fn convert(&self, workflow: &UiWorkflow) -> Result<ConversionOutcome, ConvertError> {
        let resolver = LinkResolver::new(workflow);
        let mut api = ApiWorkflow::default();
        let mut issues = Vec::new();

        for node in &workflow.nodes {
            if api.nodes.contains_key(&node.id) {
                return Err(ConvertError::DuplicateNodeId { id: node.id });
            }
            let api_node = self.convert_node(node, &resolver, &mut issues);
            api.nodes.insert(node.id, api_node);
        }

        Ok(ConversionOutcome {
            workflow: api,
            issues,
        })
    }

    /// Runs the full pipeline: convert, merge overrides, validate. Findings
    /// from all three phases are accumulated in order.
    pub fn compile(
        &self,
        workflow: &UiWorkflow,
        overrides: Option<&ParamOverrides>,
    ) -> Result<ConversionOutcome, ConvertError> {
        let mut outcome = self.convert(workflow)?;
        if let Some(overrides) = overrides {
            let merge_issues = merge::merge_overrides(&mut outcome.workflow, overrides);
            outcome.issues.extend(merge_issues);
        }
        let validation = validate::validate(&mut outcome.workflow, self.schemas);
        outcome.issues.extend(validation);
        Ok(outcome)
    }

    fn convert_node(
        &self,
        node: &UiNode,
        resolver: &LinkResolver,
        issues: &mut Vec<Issue>,
    ) -> ApiNode {
        let schema = self.schemas.get(&node.class_type);
        let mut inputs = BTreeMap::new();

        for (name, value) in
            widgets::map_widgets(node, schema.as_deref(), &self.widget_table, issues)
        {
            inputs.insert(name, InputValue::Literal(value));
        }

        // Connections overwrite widget-derived values on name collision.
        for (slot_index, slot) in node.inputs.iter().enumerate() {
            let Some(link_id) = slot.link else {
                continue;
            };
            let Some(name) = resolver.input_name(node.id, slot_index as u32) else {
                log::warn!(
                    "node {}: input slot {} is connected but has no name",
                    node.id,
                    slot_index
                );
                issues.push(Issue::UnnamedSlot {
                    node_id: node.id,
                    slot: slot_index,
                });
                continue;
            };
            let Some(link) = resolver.link(link_id) else {
                log::warn!(
                    "node {}: link {} for input '{}' not found",
                    node.id,
                    link_id,
                    name
                );
                issues.push(Issue::UnresolvedLink {
                    node_id: node.id,
                    input: name.to_string(),
                    link_id,
                });
                continue;
            };
            inputs.insert(
                name.to_string(),
                InputValue::Reference {
                    node: link.source_node,
                    slot: link.source_slot,
                },
            );
        }

        ApiNode {
            inputs,
            class_type: node.class_type.clone(),
            meta: NodeMeta {
                title: node.resolved_title().to_string(),
            },
        }
    }
}
