use serde::{Deserialize, Serialize};

/// Flags the host reads when it loads a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOptions {
    /// Every input value arrives as a sequence; the host fans a batch of upstream values into one call.
    pub receive_inputs_as_lists: bool,
    /// The node's results are a final artifact of a run, not only input for downstream nodes.
    pub output_node: bool,
    /// Slash-delimited menu path. Presentation only.
    pub category: String,
    pub description: String,
}

impl NodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receive_inputs_as_lists(mut self, value: bool) -> Self {
        self.receive_inputs_as_lists = value;
        self
    }

    pub fn output_node(mut self, value: bool) -> Self {
        self.output_node = value;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The menu path split into its segments, empty segments dropped.
    pub fn category_path(&self) -> Vec<&str> {
        self.category
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
