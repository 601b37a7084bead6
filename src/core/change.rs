use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::sync_impl::NodeValue;

/// Opaque value the host compares against the previous one to decide whether
/// a node's cached result is stale. Only equality is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeToken(NodeValue);

impl ChangeToken {
    pub fn new(value: impl Into<NodeValue>) -> Self {
        ChangeToken(value.into())
    }

    /// Wall-clock seconds since the epoch, with microsecond resolution.
    /// Two readings are not guaranteed to differ.
    pub fn now() -> Self {
        let micros = chrono::Utc::now().timestamp_micros();
        ChangeToken(NodeValue::from(micros as f64 / 1_000_000.0))
    }

    pub fn as_value(&self) -> &NodeValue {
        &self.0
    }
}

/// Host-side record of the last token returned by each node.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last: HashMap<String, ChangeToken>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token` for `node_id` and reports whether the node is dirty:
    /// true on first sight or when the token differs from the stored one.
    pub fn observe(&mut self, node_id: &str, token: ChangeToken) -> bool {
        match self.last.get(node_id) {
            Some(previous) if *previous == token => false,
            _ => {
                log::debug!("Node '{}' reported a new change token", node_id);
                self.last.insert(node_id.to_string(), token);
                true
            }
        }
    }

    pub fn last(&self, node_id: &str) -> Option<&ChangeToken> {
        self.last.get(node_id)
    }

    pub fn forget(&mut self, node_id: &str) -> Option<ChangeToken> {
        self.last.remove(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_tracker_marks_dirty_only_on_change() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe("node", ChangeToken::new(1)));
        assert!(!tracker.observe("node", ChangeToken::new(1)));
        assert!(tracker.observe("node", ChangeToken::new(2)));
        assert_eq!(tracker.last("node"), Some(&ChangeToken::new(2)));
    }

    #[test]
    fn test_tracker_keeps_nodes_apart() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe("a", ChangeToken::new("x")));
        assert!(tracker.observe("b", ChangeToken::new("x")));
        assert!(tracker.forget("a").is_some());
        assert!(tracker.observe("a", ChangeToken::new("x")));
    }

    #[test]
    fn test_clock_tokens_differ_over_time() {
        let first = ChangeToken::now();
        sleep(Duration::from_millis(5));
        let second = ChangeToken::now();
        assert_ne!(first, second);
        assert!(first.as_value().is_f64());
    }
}
