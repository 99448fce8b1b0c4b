use crate::graph::ui::{UiLink, UiWorkflow};
use ahash::AHashMap;

/// Prebuilt lookup tables over a workflow's connections.
///
/// Built once per conversion; a pure function of the workflow. Dangling link
/// ids simply resolve to `None` and are handled by the caller.
pub struct LinkResolver<'a> {
    links: AHashMap<u64, &'a UiLink>,
    input_names: AHashMap<(u64, u32), &'a str>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(workflow: &'a UiWorkflow) -> Self {
        let links = workflow.links.iter().map(|link| (link.id, link)).collect();

        let mut input_names = AHashMap::new();
        for node in &workflow.nodes {
            for (slot_index, slot) in node.inputs.iter().enumerate() {
                if let Some(name) = &slot.name {
                    input_names.insert((node.id, slot_index as u32), name.as_str());
                }
            }
        }

        Self { links, input_names }
    }

    /// The link with the given id, if the workflow contains one.
    pub fn link(&self, link_id: u64) -> Option<&'a UiLink> {
        self.links.get(&link_id).copied()
    }

    /// The declared name of a node's input slot.
    pub fn input_name(&self, node_id: u64, slot_index: u32) -> Option<&'a str> {
        self.input_names.get(&(node_id, slot_index)).copied()
    }
}
