//! Trace output for node invocations.
//!
//! Nodes never print directly: they receive a [`Console`] and emit
//! `PREFIX: VALUE` lines through it. The lines are a debugging aid only.

use std::io::Write;
use std::sync::Mutex;

use crate::core::sync_impl::NodeValue;

/// Receives human-readable trace lines from a node.
pub trait Console: Send + Sync {
    /// Emits one `prefix: value` line. Must never fail.
    fn emit_line(&self, prefix: &str, value: &str);

    /// Emits a value, rendering it with [`render_value`].
    fn emit_value(&self, prefix: &str, value: &NodeValue) {
        self.emit_line(prefix, &render_value(value));
    }
}

/// Strings render bare, everything else as compact JSON.
pub fn render_value(value: &NodeValue) -> String {
    match value {
        NodeValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

const ANSI_CYAN: &str = "\x1b[96m";
const ANSI_RESET: &str = "\x1b[0m";

/// Writes each line in bright cyan followed by a blank line.
pub struct AnsiConsole<W: Write + Send> {
    out: Mutex<W>,
}

impl AnsiConsole<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> AnsiConsole<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Console for AnsiConsole<W> {
    fn emit_line(&self, prefix: &str, value: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Tracing must not fail an invocation, so write errors are dropped.
        let _ = write!(out, "{}{}: {}{}\n\n", ANSI_CYAN, prefix, value, ANSI_RESET);
        let _ = out.flush();
    }
}

/// Simple in-memory collector for trace lines.
#[derive(Default)]
pub struct MemoryConsole {
    lines: Mutex<Vec<(String, String)>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(String, String)> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// All values emitted under `prefix`, in order.
    pub fn values_for(&self, prefix: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(p, _)| p == prefix)
            .map(|(_, v)| v)
            .collect()
    }
}

impl Console for MemoryConsole {
    fn emit_line(&self, prefix: &str, value: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((prefix.to_string(), value.to_string()));
    }
}

/// Forwards trace lines to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConsole;

impl Console for LogConsole {
    fn emit_line(&self, prefix: &str, value: &str) {
        log::info!("{}: {}", prefix, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ansi_line_format() {
        let console = AnsiConsole::new(Vec::new());
        console.emit_line("required_input", "hi");
        let written = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(written, "\x1b[96mrequired_input: hi\x1b[0m\n\n");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("text")), "text");
        assert_eq!(render_value(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(render_value(&NodeValue::Null), "null");
    }

    #[test]
    fn test_log_console_never_fails_without_logger() {
        LogConsole.emit_value("value", &json!({"a": 1}));
    }

    #[test]
    fn test_memory_console_collects_in_order() {
        let console = MemoryConsole::new();
        console.emit_line("a", "1");
        console.emit_value("b", &json!(2));
        console.emit_line("a", "3");
        assert_eq!(console.lines().len(), 3);
        assert_eq!(console.values_for("a"), vec!["1", "3"]);
        assert_eq!(console.values_for("b"), vec!["2"]);
    }
}
