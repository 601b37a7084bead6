//! Loads the plugin's nodes the way a host would and runs the tutorial node.
//!
//! This demo shows:
//! - Registering nodes and reading back the host-facing description
//! - Preparing an invocation with host-supplied hidden values
//! - Change tokens driving re-execution
//! - Trace lines written to the console
//!
//! Run with `RUST_LOG=debug cargo run --example tutorial_node` to see the lifecycle logs.

use nodeplug::nodes::{self, tutorial};
use nodeplug::prelude::*;
use nodeplug::AnsiConsole;
use serde_json::json;

fn main() -> Result<(), NodeError> {
    env_logger::init();

    let registry = nodes::registry()?;
    println!("=== Registered nodes ===");
    for id in registry.ids() {
        println!("  {} -> {}", id, registry.display_name(id));
    }

    let info = registry.object_info();
    println!("\n=== Host description of {} ===", tutorial::ID);
    println!(
        "{}",
        serde_json::to_string_pretty(&info[tutorial::ID]).unwrap_or_default()
    );

    let Some(node) = registry.get(tutorial::ID) else {
        return Err(NodeError::SchemaDeclaration(format!(
            "{} is not registered",
            tutorial::ID
        )));
    };

    let console = AnsiConsole::stdout();
    let host = HostContext::new().with_prompt(json!({ "1": { "class_type": tutorial::ID } }));
    let raw = NodeInputs::new()
        .with("required_input", "hi")
        .with("optional_input", "")
        .with("optional_oneof", "option1");

    let mut tracker = ChangeTracker::new();
    for round in 1..=2 {
        println!("\n--- Round {} ---", round);
        let inputs = node.prepare(&raw, &host)?;
        let dirty = match node.change_signal(&inputs, &console) {
            Some(token) => tracker.observe(&host.unique_id, token),
            None => true,
        };
        if !dirty {
            println!("Cached result reused");
            continue;
        }
        let outputs = node.run(&raw, &host, &console)?;
        println!("Outputs: {}", json!(outputs.values()));
    }

    Ok(())
}
