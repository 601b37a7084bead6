use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

use crate::core::error::NodeError;
use crate::core::schema::HiddenKind;
use crate::core::sync_impl::NodeValue;

/// The values handed to one call, keyed by input name.
///
/// When a node receives inputs as lists every value is a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeInputs {
    values: HashMap<String, NodeValue>,
}

impl NodeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<NodeValue>,
    ) -> Option<NodeValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Input names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NodeValue)> {
        self.values.iter()
    }

    /// The named subset of these inputs. Names with no value are skipped, not errors.
    pub fn restrict(&self, names: &[&str]) -> NodeInputs {
        names
            .iter()
            .filter_map(|name| {
                self.values
                    .get(*name)
                    .map(|v| (name.to_string(), v.clone()))
            })
            .collect()
    }

    fn require(&self, name: &str) -> Result<&NodeValue, NodeError> {
        self.values
            .get(name)
            .ok_or_else(|| NodeError::MissingInput(name.to_string()))
    }

    pub fn str(&self, name: &str) -> Result<&str, NodeError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| type_error(name, "STRING"))
    }

    pub fn int(&self, name: &str) -> Result<i64, NodeError> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| type_error(name, "INT"))
    }

    pub fn float(&self, name: &str) -> Result<f64, NodeError> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| type_error(name, "FLOAT"))
    }

    pub fn bool(&self, name: &str) -> Result<bool, NodeError> {
        self.require(name)?
            .as_bool()
            .ok_or_else(|| type_error(name, "BOOLEAN"))
    }

    pub fn list(&self, name: &str) -> Result<&[NodeValue], NodeError> {
        self.require(name)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| type_error(name, "list"))
    }

    pub fn str_list(&self, name: &str) -> Result<Vec<&str>, NodeError> {
        self.list(name)?
            .iter()
            .map(|v| v.as_str().ok_or_else(|| type_error(name, "list of STRING")))
            .collect()
    }
}

fn type_error(name: &str, expected: &str) -> NodeError {
    NodeError::InputType {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

impl FromIterator<(String, NodeValue)> for NodeInputs {
    fn from_iter<I: IntoIterator<Item = (String, NodeValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, NodeValue>> for NodeInputs {
    fn from(values: HashMap<String, NodeValue>) -> Self {
        Self { values }
    }
}

/// The ordered results of one call, one entry per declared output.
///
/// Always a sequence, even for a single output, so a one-output node can
/// never be confused with a node returning the parts of a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeOutputs(Vec<NodeValue>);

impl NodeOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single value.
    pub fn with(mut self, value: impl Into<NodeValue>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Appends a sequence, for outputs declared as lists.
    pub fn with_list<I, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<NodeValue>,
    {
        self.0
            .push(NodeValue::Array(items.into_iter().map(Into::into).collect()));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NodeValue> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[NodeValue] {
        &self.0
    }

    pub fn into_values(self) -> Vec<NodeValue> {
        self.0
    }
}

impl From<Vec<NodeValue>> for NodeOutputs {
    fn from(values: Vec<NodeValue>) -> Self {
        NodeOutputs(values)
    }
}

/// Values the host supplies for hidden inputs during one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct HostContext {
    pub unique_id: String,
    pub prompt: NodeValue,
    pub extra_pnginfo: NodeValue,
}

impl Default for HostContext {
    fn default() -> Self {
        Self {
            unique_id: uuid::Uuid::new_v4().to_string(),
            prompt: json!({}),
            extra_pnginfo: json!({}),
        }
    }
}

impl HostContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = unique_id.into();
        self
    }

    pub fn with_prompt(mut self, prompt: NodeValue) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_extra_pnginfo(mut self, extra_pnginfo: NodeValue) -> Self {
        self.extra_pnginfo = extra_pnginfo;
        self
    }

    pub fn value_for(&self, kind: HiddenKind) -> NodeValue {
        match kind {
            HiddenKind::UniqueId => json!(self.unique_id),
            HiddenKind::Prompt => self.prompt.clone(),
            HiddenKind::ExtraPngInfo => self.extra_pnginfo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrict_skips_absent_names() {
        let inputs = NodeInputs::new().with("a", 1).with("b", 2).with("c", 3);
        let subset = inputs.restrict(&["a", "c", "missing"]);
        assert_eq!(subset.names(), vec!["a", "c"]);
        assert_eq!(subset.get("c"), Some(&json!(3)));
    }

    #[test]
    fn test_typed_accessors() {
        let inputs = NodeInputs::new()
            .with("text", "hi")
            .with("count", 3)
            .with("ratio", 0.5)
            .with("flag", true)
            .with("items", json!(["x", "y"]));

        assert_eq!(inputs.str("text").unwrap(), "hi");
        assert_eq!(inputs.int("count").unwrap(), 3);
        assert_eq!(inputs.float("ratio").unwrap(), 0.5);
        assert!(inputs.bool("flag").unwrap());
        assert_eq!(inputs.str_list("items").unwrap(), vec!["x", "y"]);

        assert!(matches!(
            inputs.int("text"),
            Err(NodeError::InputType { expected, .. }) if expected == "INT"
        ));
        assert!(matches!(inputs.str("nope"), Err(NodeError::MissingInput(n)) if n == "nope"));
    }

    #[test]
    fn test_single_output_is_still_a_sequence() {
        let outputs = NodeOutputs::new().with("only");
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.values(), &[json!("only")]);

        let outputs = NodeOutputs::new().with_list(["a", "b"]);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.get(0), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_host_context_generates_unique_ids() {
        let a = HostContext::new();
        let b = HostContext::new();
        assert_ne!(a.unique_id, b.unique_id);
        assert_eq!(
            a.clone().with_unique_id("7").value_for(HiddenKind::UniqueId),
            json!("7")
        );
        assert_eq!(a.value_for(HiddenKind::Prompt), json!({}));
    }
}
