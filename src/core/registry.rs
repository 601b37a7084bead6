use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::NodeError;
use crate::core::sync_impl::NodeValue;
use crate::core::sync_impl::node::Node;

/// The two mappings a plugin hands to the host: identifier → node and
/// identifier → display name.
///
/// Identifiers must be unique across every plugin the host loads, so
/// [`NodeRegistry::merge`] refuses any overlap.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    class_mappings: BTreeMap<String, Node>,
    display_names: BTreeMap<String, String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` under `id` together with its display name.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        display_name: impl Into<String>,
        node: Node,
    ) -> Result<(), NodeError> {
        let id = id.into();
        self.register_node(id.clone(), node)?;
        self.display_names.insert(id, display_name.into());
        Ok(())
    }

    /// Registers `node` without a display name; the host then shows the id.
    pub fn register_node(&mut self, id: impl Into<String>, node: Node) -> Result<(), NodeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(NodeError::SchemaDeclaration(
                "node identifier must not be empty".to_string(),
            ));
        }
        if self.class_mappings.contains_key(&id) {
            return Err(NodeError::DuplicateIdentifier(id));
        }
        log::debug!("Registered node '{}'", id);
        self.class_mappings.insert(id, node);
        Ok(())
    }

    /// Sets a display name. The id does not need a registered node: the host
    /// tolerates names for nodes it never loads.
    pub fn set_display_name(&mut self, id: impl Into<String>, display_name: impl Into<String>) {
        let id = id.into();
        if !self.class_mappings.contains_key(&id) {
            log::debug!("Display name set for '{}' which has no node", id);
        }
        self.display_names.insert(id, display_name.into());
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.class_mappings.get(id)
    }

    /// The display name for `id`, falling back to the id itself.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.display_names.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Registered node ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        self.class_mappings.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.class_mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_mappings.is_empty()
    }

    /// Folds another plugin's mappings into this one. An id collides when
    /// either of its mappings already knows it here, so a display name with
    /// no node still claims its id. Every colliding id is reported at once and
    /// nothing is merged when there is any collision.
    pub fn merge(&mut self, other: NodeRegistry) -> Result<(), NodeError> {
        let collisions: Vec<String> = other
            .class_mappings
            .keys()
            .chain(other.display_names.keys())
            .filter(|id| self.knows(id))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !collisions.is_empty() {
            return Err(NodeError::IdentifierCollision(collisions));
        }
        self.class_mappings.extend(other.class_mappings);
        self.display_names.extend(other.display_names);
        Ok(())
    }

    fn knows(&self, id: &str) -> bool {
        self.class_mappings.contains_key(id) || self.display_names.contains_key(id)
    }

    /// Describes one registered node in the host's object-info format.
    pub fn node_info(&self, id: &str) -> Option<NodeValue> {
        let node = self.get(id)?;
        let options = node.options();
        let mut info = node.describe_schema().host_spec();
        if let NodeValue::Object(map) = &mut info {
            map.insert("name".to_string(), json!(id));
            map.insert("display_name".to_string(), json!(self.display_name(id)));
            map.insert("description".to_string(), json!(options.description));
            map.insert("category".to_string(), json!(options.category));
            map.insert("output_node".to_string(), json!(options.output_node));
            map.insert(
                "input_is_list".to_string(),
                json!(options.receive_inputs_as_lists),
            );
        }
        Some(info)
    }

    /// Describes every registered node, keyed by id.
    pub fn object_info(&self) -> NodeValue {
        let nodes = self
            .class_mappings
            .keys()
            .filter_map(|id| self.node_info(id).map(|info| (id.clone(), info)))
            .collect::<serde_json::Map<String, NodeValue>>();
        NodeValue::Object(nodes)
    }
}
