use crate::core::console::Console;
use crate::core::error::NodeError;
use crate::core::options::NodeOptions;
use crate::core::schema::{HiddenKind, InputKind, SchemaDescription};
use crate::core::sync_impl::invocation::{NodeInputs, NodeOutputs};
use crate::core::sync_impl::node::{InputValidator, NodeLogic};

pub const ID: &str = "Example";
pub const DISPLAY_NAME: &str = "Example";

const MAX_REPEAT: i64 = 16;

/// Repeats a piece of text, one scalar value per input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleNode;

impl NodeLogic for ExampleNode {
    fn schema(&self) -> SchemaDescription {
        SchemaDescription::new()
            .required("text", InputKind::multiline("Hello World!"))
            .required("repeat", InputKind::int(1, 1, MAX_REPEAT))
            .optional("uppercase", InputKind::boolean(false))
            .optional("separator", InputKind::choice(["space", "newline", "none"]))
            .hidden("unique_id", HiddenKind::UniqueId)
            .output("TEXT", "STRING")
            .output("LENGTH", "INT")
    }

    fn options(&self) -> NodeOptions {
        NodeOptions::new()
            .category("examples/text")
            .description("Repeats a piece of text.")
    }

    fn process(
        &self,
        inputs: &NodeInputs,
        console: &dyn Console,
    ) -> Result<NodeOutputs, NodeError> {
        let text = inputs.str("text")?;
        let repeat = inputs.int("repeat")?;
        if !(0..=MAX_REPEAT).contains(&repeat) {
            return Err(NodeError::Processing(format!(
                "repeat must be between 0 and {}, got {}",
                MAX_REPEAT, repeat
            )));
        }
        let repeat = repeat as usize;
        let uppercase = match inputs.get("uppercase") {
            Some(_) => inputs.bool("uppercase")?,
            None => false,
        };
        let separator = match inputs.get("separator").and_then(|v| v.as_str()) {
            Some("newline") => "\n",
            Some("none") => "",
            _ => " ",
        };

        let mut body = vec![text; repeat].join(separator);
        if uppercase {
            body = body.to_uppercase();
        }
        let length = body.chars().count() as i64;

        console.emit_line(
            "Example",
            &format!(
                "node {} produced {} chars",
                inputs.str("unique_id").unwrap_or("?"),
                length
            ),
        );
        Ok(NodeOutputs::new().with(body).with(length))
    }

    fn as_validator(&self) -> Option<&dyn InputValidator> {
        Some(self)
    }

    fn clone_box(&self) -> Box<dyn NodeLogic> {
        Box::new(*self)
    }
}

impl InputValidator for ExampleNode {
    fn parameters(&self) -> Vec<&str> {
        vec!["text"]
    }

    fn validate(&self, inputs: &NodeInputs) -> Result<(), String> {
        match inputs.str("text") {
            Ok(text) if !text.trim().is_empty() => Ok(()),
            _ => Err("text must not be empty".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::MemoryConsole;
    use crate::core::sync_impl::invocation::HostContext;
    use crate::core::sync_impl::node::Node;
    use serde_json::json;

    fn run(raw: NodeInputs) -> Result<NodeOutputs, NodeError> {
        let node = Node::new(ExampleNode).unwrap();
        node.run(&raw, &HostContext::new().with_unique_id("3"), &MemoryConsole::new())
    }

    #[test]
    fn test_repeats_with_separator() {
        let outputs = run(NodeInputs::new()
            .with("text", "ab")
            .with("repeat", 3)
            .with("separator", "none"))
        .unwrap();
        assert_eq!(outputs.values(), &[json!("ababab"), json!(6)]);
    }

    #[test]
    fn test_uppercase_and_default_separator() {
        let outputs = run(NodeInputs::new()
            .with("text", "hi")
            .with("repeat", 2)
            .with("uppercase", true))
        .unwrap();
        assert_eq!(outputs.get(0), Some(&json!("HI HI")));
    }

    #[test]
    fn test_blank_text_rejected_by_validator() {
        let err = run(NodeInputs::new().with("text", "   ").with("repeat", 1)).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: text must not be empty");
    }

    #[test]
    fn test_out_of_range_repeat_rejected_by_host_checks() {
        let err = run(NodeInputs::new().with("text", "a").with("repeat", 40)).unwrap_err();
        assert!(matches!(err, NodeError::Validation(ref m) if m.contains("bigger than max of 16")));
    }

    #[test]
    fn test_process_refuses_unbounded_repeat() {
        let node = Node::new(ExampleNode).unwrap();
        let console = MemoryConsole::new();
        for repeat in [i64::MAX, -1] {
            let inputs = NodeInputs::new().with("text", "a").with("repeat", repeat);
            let err = node.process(&inputs, &console).unwrap_err();
            assert!(matches!(err, NodeError::Processing(ref m) if m.contains("between 0 and 16")));
        }
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_unknown_separator_rejected() {
        let err = run(NodeInputs::new()
            .with("text", "a")
            .with("repeat", 1)
            .with("separator", "tab"))
        .unwrap_err();
        assert!(matches!(err, NodeError::Validation(ref m) if m.contains("value not in list")));
    }

    #[test]
    fn test_traces_unique_id() {
        let node = Node::new(ExampleNode).unwrap();
        let console = MemoryConsole::new();
        node.run(
            &NodeInputs::new().with("text", "a").with("repeat", 2),
            &HostContext::new().with_unique_id("9"),
            &console,
        )
        .unwrap();
        assert_eq!(console.values_for("Example"), vec!["node 9 produced 3 chars"]);
    }
}
