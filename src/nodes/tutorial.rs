//! A node that does nothing but show what the host hands it.
//!
//! Every capability is wired up: it declares required, optional and hidden
//! inputs, receives them as lists, validates them, always reports itself as
//! changed, and traces every value it is given before returning constants.

use crate::core::change::ChangeToken;
use crate::core::console::Console;
use crate::core::error::NodeError;
use crate::core::options::NodeOptions;
use crate::core::schema::{HiddenKind, InputKind, SchemaDescription};
use crate::core::sync_impl::NodeValue;
use crate::core::sync_impl::invocation::{NodeInputs, NodeOutputs};
use crate::core::sync_impl::node::{ChangeDetector, InputValidator, NodeLogic};

pub const ID: &str = "RF_Tutorial";
pub const DISPLAY_NAME: &str = "A custom name to display in the UI";

/// Inputs handed to the validator and the change detector.
/// `hidden_pnginfo` is opaque to both.
const INTROSPECTED: [&str; 5] = [
    "required_input",
    "optional_input",
    "optional_oneof",
    "hidden_prompt",
    "hidden_uniqueid",
];

/// Trace order of `process`.
const TRACED: [&str; 6] = [
    "required_input",
    "optional_input",
    "optional_oneof",
    "hidden_prompt",
    "hidden_pnginfo",
    "hidden_uniqueid",
];

static ABSENT: NodeValue = NodeValue::Null;

#[derive(Debug, Clone, Copy, Default)]
pub struct TutorialNode;

impl NodeLogic for TutorialNode {
    fn schema(&self) -> SchemaDescription {
        SchemaDescription::new()
            .required("required_input", InputKind::multiline(""))
            .optional("optional_input", InputKind::multiline(""))
            .optional("optional_oneof", InputKind::choice(["option1", "option2"]))
            .hidden("hidden_uniqueid", HiddenKind::UniqueId)
            .hidden("hidden_prompt", HiddenKind::Prompt)
            .hidden("hidden_pnginfo", HiddenKind::ExtraPngInfo)
            .list_output("LIST", "STRING")
            .output("TEXT", "STRING")
    }

    fn options(&self) -> NodeOptions {
        NodeOptions::new()
            .receive_inputs_as_lists(true)
            .output_node(true)
            .category("path/to/node")
    }

    fn process_parameters(&self) -> Option<Vec<&str>> {
        Some(TRACED.to_vec())
    }

    fn process(
        &self,
        inputs: &NodeInputs,
        console: &dyn Console,
    ) -> Result<NodeOutputs, NodeError> {
        for name in TRACED {
            console.emit_value(name, inputs.get(name).unwrap_or(&ABSENT));
        }

        Ok(NodeOutputs::new().with_list(["john", "smith"]).with("text"))
    }

    fn as_validator(&self) -> Option<&dyn InputValidator> {
        Some(self)
    }

    fn as_change_detector(&self) -> Option<&dyn ChangeDetector> {
        Some(self)
    }

    fn clone_box(&self) -> Box<dyn NodeLogic> {
        Box::new(*self)
    }
}

impl InputValidator for TutorialNode {
    fn parameters(&self) -> Vec<&str> {
        INTROSPECTED.to_vec()
    }

    fn validate(&self, _inputs: &NodeInputs) -> Result<(), String> {
        Ok(())
    }
}

impl ChangeDetector for TutorialNode {
    fn parameters(&self) -> Vec<&str> {
        INTROSPECTED.to_vec()
    }

    fn change_token(&self, _inputs: &NodeInputs, console: &dyn Console) -> ChangeToken {
        console.emit_line("IS_CHANGED", "IS_CHANGED");
        ChangeToken::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::MemoryConsole;
    use crate::core::sync_impl::invocation::HostContext;
    use crate::core::sync_impl::node::Node;
    use serde_json::json;

    #[test]
    fn test_schema_is_idempotent() {
        assert_eq!(TutorialNode.schema(), TutorialNode.schema());
        assert!(TutorialNode.schema().check().is_safe());
    }

    #[test]
    fn test_bindings_are_declared() {
        let node = Node::new(TutorialNode).unwrap();
        let report = node.declaration_report();
        assert!(report.is_safe());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_process_traces_every_input_in_order() {
        let node = Node::new(TutorialNode).unwrap();
        let console = MemoryConsole::new();
        let host = HostContext::new().with_unique_id("5");
        let raw = NodeInputs::new()
            .with("required_input", "hi")
            .with("optional_input", "")
            .with("optional_oneof", "option1");

        let outputs = node.run(&raw, &host, &console).unwrap();
        assert_eq!(outputs.values(), &[json!(["john", "smith"]), json!("text")]);

        let prefixes: Vec<String> = console.lines().into_iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, TRACED.to_vec());
        assert_eq!(console.values_for("required_input"), vec![r#"["hi"]"#]);
        assert_eq!(console.values_for("hidden_uniqueid"), vec![r#"["5"]"#]);
    }

    #[test]
    fn test_change_detector_traces_and_returns_clock() {
        let node = Node::new(TutorialNode).unwrap();
        let console = MemoryConsole::new();
        let token = node.change_signal(&NodeInputs::new(), &console).unwrap();
        assert!(token.as_value().is_number());
        assert_eq!(console.values_for("IS_CHANGED"), vec!["IS_CHANGED"]);
    }
}
