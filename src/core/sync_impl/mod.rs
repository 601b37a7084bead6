//! Synchronous, call-and-return node contract.
//!
//! - [`node::NodeLogic`] and its optional capabilities, implemented by plugin nodes
//! - [`node::Node`], the checked wrapper the host calls into
//! - [`invocation`] types describing a single call
//! - [`NodeValue`] type alias for the JSON values carried by inputs and outputs

pub mod invocation;
pub mod node;

/// The Alias for serde_json::Value since it is used everywhere
pub type NodeValue = serde_json::Value;
