//! The nodes this plugin exposes to the host.

pub mod example;
pub mod tutorial;

pub use example::ExampleNode;
pub use tutorial::TutorialNode;

use crate::core::error::NodeError;
use crate::core::registry::NodeRegistry;
use crate::core::sync_impl::node::Node;

/// Adds every node of this plugin, with its display name, to `registry`.
pub fn register_nodes(registry: &mut NodeRegistry) -> Result<(), NodeError> {
    registry.register(tutorial::ID, tutorial::DISPLAY_NAME, Node::new(TutorialNode)?)?;
    registry.register(example::ID, example::DISPLAY_NAME, Node::new(ExampleNode)?)?;
    Ok(())
}

/// A fresh registry holding only this plugin's nodes.
pub fn registry() -> Result<NodeRegistry, NodeError> {
    let mut registry = NodeRegistry::new();
    register_nodes(&mut registry)?;
    Ok(registry)
}
