use std::sync::Arc;

use crate::core::change::ChangeToken;
use crate::core::console::Console;
use crate::core::error::NodeError;
use crate::core::options::NodeOptions;
use crate::core::schema::SchemaDescription;
use crate::core::sync_impl::NodeValue;
use crate::core::sync_impl::invocation::{HostContext, NodeInputs, NodeOutputs};
use crate::core::validation::ValidationResult;

/// Defines the behavior of a node.
pub trait NodeLogic: Send + Sync + 'static {
    /// The static schema. Must be pure: the host calls it at arbitrary times.
    fn schema(&self) -> SchemaDescription;

    /// Flags read by the host at load time.
    fn options(&self) -> NodeOptions {
        NodeOptions::default()
    }

    /// Names `process` reads, checked against the schema when the node is built.
    /// `None` means every declared input.
    fn process_parameters(&self) -> Option<Vec<&str>> {
        None
    }

    /// Consumes the declared inputs and produces one value per declared output, in order.
    fn process(&self, inputs: &NodeInputs, console: &dyn Console)
    -> Result<NodeOutputs, NodeError>;

    /// Optional: Returns the validator for this node if it has one.
    fn as_validator(&self) -> Option<&dyn InputValidator> {
        None
    }

    /// Optional: Returns the change detector for this node if it has one.
    fn as_change_detector(&self) -> Option<&dyn ChangeDetector> {
        None
    }

    /// Create a boxed clone of this trait object.
    fn clone_box(&self) -> Box<dyn NodeLogic>;
}

impl Clone for Box<dyn NodeLogic> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Custom validation over a fixed subset of the declared inputs.
pub trait InputValidator: Send + Sync {
    /// The input names this validator receives. Fixed for the lifetime of the node.
    fn parameters(&self) -> Vec<&str>;

    /// `Err` carries one message for the whole node, whichever input was at fault.
    fn validate(&self, inputs: &NodeInputs) -> Result<(), String>;
}

/// Tells the host when a node must run again even though its inputs did not change.
pub trait ChangeDetector: Send + Sync {
    /// The input names this detector receives. Must not include `EXTRA_PNGINFO` inputs.
    fn parameters(&self) -> Vec<&str>;

    /// Returning a token different from the previous one marks the node dirty.
    fn change_token(&self, inputs: &NodeInputs, console: &dyn Console) -> ChangeToken;
}

/// A node whose capability bindings have been checked against its schema.
pub struct Node {
    /// The logic implementation that defines the node's behavior
    pub behaviour: Box<dyn NodeLogic>,
    validator: Option<Arc<dyn InputValidator>>,
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            behaviour: self.behaviour.clone_box(),
            validator: self.validator.clone(),
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("schema", &self.describe_schema())
            .field("options", &self.options())
            .finish()
    }
}

impl Node {
    /// Wraps `behaviour`, failing fast when a capability names an input the
    /// schema does not declare or the schema itself is malformed.
    pub fn new<L: NodeLogic>(behaviour: L) -> Result<Self, NodeError> {
        let node = Node {
            behaviour: Box::new(behaviour),
            validator: None,
        };
        node.ensure_declarations()?;
        Ok(node)
    }

    /// Installs a validator. Only one validator is active per node: this one
    /// replaces whichever was there before.
    pub fn with_validator<V: InputValidator + 'static>(
        mut self,
        validator: V,
    ) -> Result<Self, NodeError> {
        if self.validator().is_some() {
            log::debug!("Replacing the active validator");
        }
        self.validator = Some(Arc::new(validator));
        self.ensure_declarations()?;
        Ok(self)
    }

    pub fn describe_schema(&self) -> SchemaDescription {
        self.behaviour.schema()
    }

    pub fn options(&self) -> NodeOptions {
        self.behaviour.options()
    }

    pub fn validator(&self) -> Option<&dyn InputValidator> {
        match &self.validator {
            Some(validator) => Some(validator.as_ref()),
            None => self.behaviour.as_validator(),
        }
    }

    pub fn change_detector(&self) -> Option<&dyn ChangeDetector> {
        self.behaviour.as_change_detector()
    }

    /// All declaration issues, warnings included.
    pub fn declaration_report(&self) -> ValidationResult {
        let schema = self.describe_schema();
        let mut result = schema.check();

        if let Some(validator) = self.validator() {
            check_parameters(&schema, "validator", &validator.parameters(), false, &mut result);
        }
        if let Some(detector) = self.change_detector() {
            check_parameters(
                &schema,
                "change detector",
                &detector.parameters(),
                false,
                &mut result,
            );
        }
        if let Some(params) = self.behaviour.process_parameters() {
            check_parameters(&schema, "process", &params, true, &mut result);
            for name in schema.input_names() {
                if !params.contains(&name) {
                    result.add_warning(format!(
                        "input '{}' is declared but never read by process",
                        name
                    ));
                }
            }
        }

        result
    }

    fn ensure_declarations(&self) -> Result<(), NodeError> {
        let report = self.declaration_report();
        match report.error_message() {
            Some(message) => Err(NodeError::SchemaDeclaration(message)),
            None => {
                report.log_summary();
                Ok(())
            }
        }
    }

    /// Builds the per-call inputs: required values must be present, optional
    /// ones are passed through when supplied, hidden ones come from `host`.
    /// Undeclared names are dropped. In list mode every value becomes a
    /// sequence; values that already are arrays are taken as the batch.
    pub fn prepare(&self, raw: &NodeInputs, host: &HostContext) -> Result<NodeInputs, NodeError> {
        let schema = self.describe_schema();
        let mut prepared = NodeInputs::new();

        for decl in &schema.required {
            let value = raw
                .get(&decl.name)
                .cloned()
                .ok_or_else(|| NodeError::MissingInput(decl.name.clone()))?;
            prepared.insert(&decl.name, value);
        }
        for decl in &schema.optional {
            if let Some(value) = raw.get(&decl.name) {
                prepared.insert(&decl.name, value.clone());
            }
        }
        for decl in &schema.hidden {
            prepared.insert(&decl.name, host.value_for(decl.kind));
        }

        for name in raw.names() {
            if !schema.declares(name) {
                log::debug!("Dropping undeclared input '{}'", name);
            }
        }

        Ok(self.shape(prepared))
    }

    /// Wraps every value in a sequence when the node receives lists. Values
    /// that already are arrays are left alone, so shaping twice is a no-op.
    fn shape(&self, inputs: NodeInputs) -> NodeInputs {
        if !self.options().receive_inputs_as_lists {
            return inputs;
        }
        inputs
            .iter()
            .map(|(name, value)| (name.clone(), as_list(value)))
            .collect()
    }

    /// Host value checks (types, ranges, choice sets) for every supplied input
    /// the active validator does not take over.
    pub fn check_inputs(&self, inputs: &NodeInputs) -> Result<(), NodeError> {
        let schema = self.describe_schema();
        let as_lists = self.options().receive_inputs_as_lists;
        let covered = self.validator().map(|v| v.parameters()).unwrap_or_default();
        let mut result = ValidationResult::new();

        for (name, value) in inputs.iter() {
            if covered.contains(&name.as_str()) || schema.hidden_input(name).is_some() {
                continue;
            }
            let values = match (as_lists, value) {
                (true, NodeValue::Array(items)) => items.iter().collect::<Vec<_>>(),
                _ => vec![value],
            };
            for v in values {
                if let Err(message) = schema.check_value(name, v) {
                    result.add_error(message);
                }
            }
        }

        match result.error_message() {
            Some(message) => Err(NodeError::Validation(message)),
            None => Ok(()),
        }
    }

    /// Runs the custom validator on its declared subset of `inputs`, shaped
    /// the way [`Node::prepare`] shapes them. A node without a validator
    /// always passes.
    pub fn validate(&self, inputs: &NodeInputs) -> Result<(), NodeError> {
        let Some(validator) = self.validator() else {
            return Ok(());
        };
        let subset = self.shape(inputs.restrict(&validator.parameters()));
        validator.validate(&subset).map_err(|message| {
            log::debug!("Validation rejected inputs: {}", message);
            NodeError::Validation(message)
        })
    }

    /// Asks the change detector for a token, or `None` when the node has none.
    pub fn change_signal(&self, inputs: &NodeInputs, console: &dyn Console) -> Option<ChangeToken> {
        let detector = self.change_detector()?;
        let subset = self.shape(inputs.restrict(&detector.parameters()));
        Some(detector.change_token(&subset, console))
    }

    /// Calls the node's processing function and checks the result shape.
    /// Errors from the node are returned untouched.
    pub fn process(
        &self,
        inputs: &NodeInputs,
        console: &dyn Console,
    ) -> Result<NodeOutputs, NodeError> {
        let outputs = self.behaviour.process(inputs, console)?;
        check_outputs(&self.describe_schema(), &outputs)?;
        Ok(outputs)
    }

    /// prepare → check_inputs → validate → process.
    pub fn run(
        &self,
        raw: &NodeInputs,
        host: &HostContext,
        console: &dyn Console,
    ) -> Result<NodeOutputs, NodeError> {
        let inputs = self.prepare(raw, host)?;
        self.check_inputs(&inputs)?;
        self.validate(&inputs)?;
        log::debug!("Processing node {} with {} inputs", host.unique_id, inputs.len());
        self.process(&inputs, console)
    }
}

fn as_list(value: &NodeValue) -> NodeValue {
    match value {
        NodeValue::Array(_) => value.clone(),
        other => NodeValue::Array(vec![other.clone()]),
    }
}

fn check_parameters(
    schema: &SchemaDescription,
    capability: &str,
    params: &[&str],
    allow_opaque: bool,
    result: &mut ValidationResult,
) {
    for name in params {
        if !schema.declares(name) {
            result.add_error(format!(
                "{} parameter '{}' is not declared in the schema",
                capability, name
            ));
        } else if !allow_opaque
            && schema
                .hidden_input(name)
                .is_some_and(|d| !d.kind.is_introspectable())
        {
            result.add_error(format!(
                "{} parameter '{}' is {} and cannot be supplied to it",
                capability,
                name,
                schema
                    .hidden_input(name)
                    .map(|d| d.kind.type_name())
                    .unwrap_or_default()
            ));
        }
    }
}

fn check_outputs(schema: &SchemaDescription, outputs: &NodeOutputs) -> Result<(), NodeError> {
    if outputs.len() != schema.outputs.len() {
        return Err(NodeError::OutputArity {
            expected: schema.outputs.len(),
            found: outputs.len(),
        });
    }
    for (index, (decl, value)) in schema.outputs.iter().zip(outputs.values()).enumerate() {
        if decl.is_list && !value.is_array() {
            return Err(NodeError::OutputNotList {
                name: decl.name.clone(),
                index,
            });
        }
    }
    Ok(())
}
