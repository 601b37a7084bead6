//! Integration tests for the plugin's registration and the tutorial node contract.

use nodeplug::nodes::{self, example, tutorial};
use nodeplug::prelude::*;
use serde_json::json;
use std::thread::sleep;
use std::time::Duration;

fn tutorial_node() -> Node {
    nodes::registry()
        .unwrap()
        .get(tutorial::ID)
        .cloned()
        .unwrap()
}

fn reference_inputs() -> NodeInputs {
    NodeInputs::new()
        .with("required_input", "hi")
        .with("optional_input", "")
        .with("optional_oneof", "option1")
}

#[test]
fn test_plugin_registers_both_mappings() {
    let registry = nodes::registry().unwrap();
    assert_eq!(registry.ids(), vec![example::ID, tutorial::ID]);
    assert_eq!(
        registry.display_name(tutorial::ID),
        "A custom name to display in the UI"
    );
    assert_eq!(registry.display_name(example::ID), "Example");
}

#[test]
fn test_registering_twice_collides() {
    let mut registry = nodes::registry().unwrap();
    let err = nodes::register_nodes(&mut registry).unwrap_err();
    assert!(matches!(err, NodeError::DuplicateIdentifier(ref id) if id == tutorial::ID));

    let mut host = nodes::registry().unwrap();
    let err = host.merge(nodes::registry().unwrap()).unwrap_err();
    assert!(matches!(err, NodeError::IdentifierCollision(ref ids) if ids.len() == 2));
}

#[test]
fn test_describe_schema_is_pure() {
    let node = tutorial_node();
    let first = node.describe_schema();
    let second = node.describe_schema();
    assert_eq!(first, second);

    assert_eq!(
        first.input_names(),
        vec![
            "required_input",
            "optional_input",
            "optional_oneof",
            "hidden_uniqueid",
            "hidden_prompt",
            "hidden_pnginfo",
        ]
    );
    assert_eq!(first.output_names(), vec!["LIST", "TEXT"]);
    assert_eq!(first.output_types(), vec!["STRING", "STRING"]);
    assert_eq!(first.output_is_list(), vec![true, false]);
}

#[test]
fn test_reference_scenario() {
    let node = tutorial_node();
    let console = MemoryConsole::new();
    let outputs = node
        .run(&reference_inputs(), &HostContext::new(), &console)
        .unwrap();

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs.get(0), Some(&json!(["john", "smith"])));
    assert_eq!(outputs.get(1), Some(&json!("text")));
    assert_eq!(console.lines().len(), 6);
}

#[test]
fn test_output_shape_matches_declaration() {
    let node = tutorial_node();
    let schema = node.describe_schema();
    let outputs = node
        .run(&reference_inputs(), &HostContext::new(), &MemoryConsole::new())
        .unwrap();

    assert_eq!(outputs.len(), schema.outputs.len());
    for (value, is_list) in outputs.values().iter().zip(schema.output_is_list()) {
        assert_eq!(value.is_array(), is_list);
    }
}

#[test]
fn test_validate_accepts_its_own_subset_only() {
    let node = tutorial_node();
    let subset = NodeInputs::new()
        .with("required_input", json!(["hi"]))
        .with("hidden_uniqueid", json!(["1"]));
    assert!(node.validate(&subset).is_ok());
    assert!(node.validate(&NodeInputs::new()).is_ok());
}

#[test]
fn test_change_tokens_are_fresh_over_time() {
    let node = tutorial_node();
    let console = MemoryConsole::new();
    let host = HostContext::new();
    let inputs = node.prepare(&reference_inputs(), &host).unwrap();

    let mut tracker = ChangeTracker::new();
    let first = node.change_signal(&inputs, &console).unwrap();
    assert!(tracker.observe(&host.unique_id, first.clone()));
    assert!(!tracker.observe(&host.unique_id, first));

    sleep(Duration::from_millis(5));
    let second = node.change_signal(&inputs, &console).unwrap();
    assert!(tracker.observe(&host.unique_id, second));
    assert_eq!(console.values_for("IS_CHANGED").len(), 2);
}

#[test]
fn test_missing_required_input_fails() {
    let node = tutorial_node();
    let err = node
        .run(&NodeInputs::new(), &HostContext::new(), &MemoryConsole::new())
        .unwrap_err();
    assert!(matches!(err, NodeError::MissingInput(ref n) if n == "required_input"));
}

#[test]
fn test_object_info_describes_tutorial() {
    let info = nodes::registry().unwrap().object_info();
    let tutorial = &info[tutorial::ID];
    assert_eq!(tutorial["category"], json!("path/to/node"));
    assert_eq!(tutorial["output_node"], json!(true));
    assert_eq!(tutorial["input_is_list"], json!(true));
    assert_eq!(tutorial["output_name"], json!(["LIST", "TEXT"]));
    assert_eq!(tutorial["input"]["hidden"]["hidden_pnginfo"], json!("EXTRA_PNGINFO"));
    assert_eq!(
        tutorial["input"]["optional"]["optional_oneof"],
        json!([["option1", "option2"], {}])
    );
}
