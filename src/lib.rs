//! # nodeplug
//!
//! A typed contract for plugin nodes hosted by a graph-based authoring tool.
//!
//! A node declares a static schema of required, optional and hidden inputs
//! plus ordered, typed outputs. It may validate its inputs and may hand the
//! host a change token to force re-execution. Its processing function turns
//! the inputs into exactly one value per output and writes trace lines to an
//! injected [`Console`].
//!
//! ## Quick Start
//!
//! ```rust
//! use nodeplug::prelude::*;
//!
//! #[derive(Clone)]
//! struct Shout;
//!
//! impl NodeLogic for Shout {
//!     fn schema(&self) -> SchemaDescription {
//!         SchemaDescription::new()
//!             .required("text", InputKind::text(""))
//!             .output("TEXT", "STRING")
//!     }
//!
//!     fn process(&self, inputs: &NodeInputs, console: &dyn Console) -> Result<NodeOutputs, NodeError> {
//!         let text = inputs.str("text")?.to_uppercase();
//!         console.emit_line("text", &text);
//!         Ok(NodeOutputs::new().with(text))
//!     }
//!
//!     fn clone_box(&self) -> Box<dyn NodeLogic> {
//!         Box::new(self.clone())
//!     }
//! }
//!
//! let mut registry = NodeRegistry::new();
//! registry.register("Shout", "Shout", Node::new(Shout).unwrap()).unwrap();
//!
//! let node = registry.get("Shout").unwrap();
//! let outputs = node
//!     .run(&NodeInputs::new().with("text", "hi"), &HostContext::new(), &MemoryConsole::new())
//!     .unwrap();
//! assert_eq!(outputs.values(), &[JsonValue::from("HI")]);
//! ```
//!
//! ## Module Organization
//!
//! - [`nodes`]: the nodes this plugin registers with the host
//! - [`prelude`]: Commonly used types and traits (import with `use nodeplug::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

mod core;

pub mod nodes;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

pub use crate::core::change::{ChangeToken, ChangeTracker};
pub use crate::core::console::{AnsiConsole, Console, LogConsole, MemoryConsole, render_value};
pub use crate::core::error::NodeError;
pub use crate::core::options::NodeOptions;
pub use crate::core::registry::NodeRegistry;
pub use crate::core::schema::{
    HiddenDeclaration, HiddenKind, InputCategory, InputDeclaration, InputKind, OutputDeclaration,
    SchemaDescription,
};
pub use crate::core::sync_impl::NodeValue;
pub use crate::core::sync_impl::invocation::{HostContext, NodeInputs, NodeOutputs};
pub use crate::core::sync_impl::node::{ChangeDetector, InputValidator, Node, NodeLogic};
pub use crate::core::validation::{ValidationIssue, ValidationResult};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// Imports everything needed to write and register a node.
///
/// # Example
/// ```rust
/// use nodeplug::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        // Capabilities
        ChangeDetector,
        ChangeToken,
        ChangeTracker,
        // Console
        Console,
        HiddenKind,
        HostContext,
        InputKind,
        InputValidator,
        JsonValue,
        MemoryConsole,
        // Core
        Node,
        NodeError,
        NodeInputs,
        NodeLogic,
        NodeOptions,
        NodeOutputs,
        NodeRegistry,
        NodeValue,
        SchemaDescription,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
