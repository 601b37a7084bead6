//! Static input/output declarations of a node.
//!
//! A [`SchemaDescription`] is what the host queries to render a node and to
//! know which values to hand it. It is built once, never mutated, and may be
//! requested any number of times.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

use crate::core::sync_impl::NodeValue;
use crate::core::validation::ValidationResult;

/// The group an input is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputCategory {
    /// The host refuses to run the node unless the input is filled or connected.
    Required,
    /// No check is done by the host on these.
    Optional,
    /// Raw data supplied by the host itself, never displayed.
    Hidden,
}

impl InputCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputCategory::Required => "required",
            InputCategory::Optional => "optional",
            InputCategory::Hidden => "hidden",
        }
    }
}

/// Type and widget configuration of a visible input slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    String { default: String, multiline: bool },
    Int { default: i64, min: i64, max: i64, step: i64 },
    Float { default: f64, min: f64, max: f64, step: f64 },
    Boolean { default: bool },
    /// One value out of a fixed set.
    Choice { options: Vec<String> },
    /// A connection-only type such as `IMAGE`; values are opaque to the host checks.
    Custom { type_name: String },
}

impl InputKind {
    /// Single-line text input.
    pub fn text(default: impl Into<String>) -> Self {
        InputKind::String {
            default: default.into(),
            multiline: false,
        }
    }

    /// Multi-line text area.
    pub fn multiline(default: impl Into<String>) -> Self {
        InputKind::String {
            default: default.into(),
            multiline: true,
        }
    }

    pub fn int(default: i64, min: i64, max: i64) -> Self {
        InputKind::Int {
            default,
            min,
            max,
            step: 1,
        }
    }

    pub fn float(default: f64, min: f64, max: f64, step: f64) -> Self {
        InputKind::Float {
            default,
            min,
            max,
            step,
        }
    }

    pub fn boolean(default: bool) -> Self {
        InputKind::Boolean { default }
    }

    pub fn choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputKind::Choice {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn custom(type_name: impl Into<String>) -> Self {
        InputKind::Custom {
            type_name: type_name.into(),
        }
    }

    /// The type name the host uses to decide what can connect to what.
    pub fn type_name(&self) -> &str {
        match self {
            InputKind::String { .. } => "STRING",
            InputKind::Int { .. } => "INT",
            InputKind::Float { .. } => "FLOAT",
            InputKind::Boolean { .. } => "BOOLEAN",
            InputKind::Choice { .. } => "COMBO",
            InputKind::Custom { type_name } => type_name,
        }
    }

    /// The value used when the host has nothing better, if the kind has one.
    pub fn default_value(&self) -> Option<NodeValue> {
        match self {
            InputKind::String { default, .. } => Some(json!(default)),
            InputKind::Int { default, .. } => Some(json!(default)),
            InputKind::Float { default, .. } => Some(json!(default)),
            InputKind::Boolean { default } => Some(json!(default)),
            InputKind::Choice { options } => options.first().map(|o| json!(o)),
            InputKind::Custom { .. } => None,
        }
    }

    /// Renders the `(type, config)` pair in the host's object-info format.
    pub fn host_spec(&self) -> NodeValue {
        match self {
            InputKind::String { default, multiline } => {
                json!(["STRING", { "default": default, "multiline": multiline }])
            }
            InputKind::Int {
                default,
                min,
                max,
                step,
            } => json!(["INT", { "default": default, "min": min, "max": max, "step": step }]),
            InputKind::Float {
                default,
                min,
                max,
                step,
            } => json!(["FLOAT", { "default": default, "min": min, "max": max, "step": step }]),
            InputKind::Boolean { default } => json!(["BOOLEAN", { "default": default }]),
            InputKind::Choice { options } => json!([options, {}]),
            InputKind::Custom { type_name } => json!([type_name]),
        }
    }

    fn check(&self, name: &str, result: &mut ValidationResult) {
        match self {
            InputKind::String { .. } | InputKind::Boolean { .. } => {}
            InputKind::Int {
                default,
                min,
                max,
                step,
            } => {
                if min > max {
                    result.add_error(format!(
                        "input '{}' has min {} greater than max {}",
                        name, min, max
                    ));
                } else if default < min || default > max {
                    result.add_error(format!(
                        "input '{}' has default {} outside [{}, {}]",
                        name, default, min, max
                    ));
                }
                if *step <= 0 {
                    result.add_error(format!("input '{}' has a non-positive step", name));
                }
            }
            InputKind::Float {
                default,
                min,
                max,
                step,
            } => {
                if min.is_nan() || max.is_nan() || default.is_nan() || step.is_nan() {
                    result.add_error(format!("input '{}' has a NaN bound", name));
                } else if min > max {
                    result.add_error(format!(
                        "input '{}' has min {} greater than max {}",
                        name, min, max
                    ));
                } else if default < min || default > max {
                    result.add_error(format!(
                        "input '{}' has default {} outside [{}, {}]",
                        name, default, min, max
                    ));
                }
                if *step <= 0.0 {
                    result.add_error(format!("input '{}' has a non-positive step", name));
                }
            }
            InputKind::Choice { options } => {
                if options.is_empty() {
                    result.add_error(format!("input '{}' has an empty choice set", name));
                }
                let mut seen = HashSet::new();
                for option in options {
                    if !seen.insert(option.as_str()) {
                        result.add_warning(format!(
                            "input '{}' lists option '{}' more than once",
                            name, option
                        ));
                    }
                }
            }
            InputKind::Custom { type_name } => {
                if type_name.trim().is_empty() {
                    result.add_error(format!("input '{}' has an empty type name", name));
                }
            }
        }
    }

    /// Host-side check of one concrete value against this kind.
    pub fn check_value(&self, name: &str, value: &NodeValue) -> Result<(), String> {
        match self {
            InputKind::String { .. } => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("{}: expected STRING, got {}", name, value))
                }
            }
            InputKind::Int { min, max, .. } => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| format!("{}: expected INT, got {}", name, value))?;
                if v < *min {
                    Err(format!("{}: value {} smaller than min of {}", name, v, min))
                } else if v > *max {
                    Err(format!("{}: value {} bigger than max of {}", name, v, max))
                } else {
                    Ok(())
                }
            }
            InputKind::Float { min, max, .. } => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| format!("{}: expected FLOAT, got {}", name, value))?;
                if v < *min {
                    Err(format!("{}: value {} smaller than min of {}", name, v, min))
                } else if v > *max {
                    Err(format!("{}: value {} bigger than max of {}", name, v, max))
                } else {
                    Ok(())
                }
            }
            InputKind::Boolean { .. } => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(format!("{}: expected BOOLEAN, got {}", name, value))
                }
            }
            InputKind::Choice { options } => match value.as_str() {
                Some(v) if options.iter().any(|o| o == v) => Ok(()),
                _ => Err(format!(
                    "value not in list: {}: {} not in {:?}",
                    name, value, options
                )),
            },
            InputKind::Custom { .. } => Ok(()),
        }
    }
}

/// Host-provided values that are never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenKind {
    /// The identifier of the node inside the running prompt.
    UniqueId,
    /// The whole prompt graph with every node's values.
    Prompt,
    /// What gets saved alongside the result. Opaque: only `process` may receive it.
    ExtraPngInfo,
}

impl HiddenKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            HiddenKind::UniqueId => "UNIQUE_ID",
            HiddenKind::Prompt => "PROMPT",
            HiddenKind::ExtraPngInfo => "EXTRA_PNGINFO",
        }
    }

    /// Whether the host can hand this value to a validator or change detector.
    pub fn is_introspectable(&self) -> bool {
        !matches!(self, HiddenKind::ExtraPngInfo)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDeclaration {
    pub name: String,
    pub kind: InputKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenDeclaration {
    pub name: String,
    pub kind: HiddenKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDeclaration {
    pub name: String,
    /// Only used by the host to know what can connect to what; never checked against values.
    pub type_name: String,
    /// When set, `process` returns a sequence at this position and downstream
    /// nodes run once per item.
    pub is_list: bool,
}

/// The full static schema of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub required: Vec<InputDeclaration>,
    pub optional: Vec<InputDeclaration>,
    pub hidden: Vec<HiddenDeclaration>,
    pub outputs: Vec<OutputDeclaration>,
}

impl SchemaDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>, kind: InputKind) -> Self {
        self.required.push(InputDeclaration {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn optional(mut self, name: impl Into<String>, kind: InputKind) -> Self {
        self.optional.push(InputDeclaration {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn hidden(mut self, name: impl Into<String>, kind: HiddenKind) -> Self {
        self.hidden.push(HiddenDeclaration {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn output(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.outputs.push(OutputDeclaration {
            name: name.into(),
            type_name: type_name.into(),
            is_list: false,
        });
        self
    }

    pub fn list_output(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.outputs.push(OutputDeclaration {
            name: name.into(),
            type_name: type_name.into(),
            is_list: true,
        });
        self
    }

    /// Looks up a required or optional input.
    pub fn input(&self, name: &str) -> Option<&InputDeclaration> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .find(|d| d.name == name)
    }

    pub fn hidden_input(&self, name: &str) -> Option<&HiddenDeclaration> {
        self.hidden.iter().find(|d| d.name == name)
    }

    pub fn category_of(&self, name: &str) -> Option<InputCategory> {
        if self.required.iter().any(|d| d.name == name) {
            Some(InputCategory::Required)
        } else if self.optional.iter().any(|d| d.name == name) {
            Some(InputCategory::Optional)
        } else if self.hidden.iter().any(|d| d.name == name) {
            Some(InputCategory::Hidden)
        } else {
            None
        }
    }

    pub fn declares(&self, name: &str) -> bool {
        self.category_of(name).is_some()
    }

    /// Every declared input name: required, then optional, then hidden.
    pub fn input_names(&self) -> Vec<&str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(|d| d.name.as_str())
            .chain(self.hidden.iter().map(|d| d.name.as_str()))
            .collect()
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn output_types(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.type_name.as_str()).collect()
    }

    pub fn output_is_list(&self) -> Vec<bool> {
        self.outputs.iter().map(|o| o.is_list).collect()
    }

    /// Declaration checks. Any error here is fatal to registration.
    pub fn check(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut seen = HashSet::new();

        for name in self.input_names() {
            if name.trim().is_empty() {
                result.add_error("input name must not be empty");
            } else if !seen.insert(name) {
                result.add_error(format!("input '{}' is declared more than once", name));
            }
        }

        for decl in self.required.iter().chain(self.optional.iter()) {
            decl.kind.check(&decl.name, &mut result);
        }

        let mut seen_outputs = HashSet::new();
        for output in &self.outputs {
            if output.name.trim().is_empty() {
                result.add_error("output name must not be empty");
            } else if !seen_outputs.insert(output.name.as_str()) {
                result.add_error(format!("output '{}' is declared more than once", output.name));
            }
            if output.type_name.trim().is_empty() {
                result.add_error(format!("output '{}' has an empty type name", output.name));
            }
        }

        result
    }

    /// Host-side check of a value supplied for `name`.
    /// Hidden inputs are opaque and always pass.
    pub fn check_value(&self, name: &str, value: &NodeValue) -> Result<(), String> {
        match self.input(name) {
            Some(decl) => decl.kind.check_value(name, value),
            None if self.hidden_input(name).is_some() => Ok(()),
            None => Err(format!("{}: input is not declared", name)),
        }
    }

    /// Renders the schema the way the host describes a node to its UI.
    pub fn host_spec(&self) -> NodeValue {
        let group = |decls: &[InputDeclaration]| {
            decls
                .iter()
                .map(|d| (d.name.clone(), d.kind.host_spec()))
                .collect::<serde_json::Map<String, NodeValue>>()
        };
        let hidden = self
            .hidden
            .iter()
            .map(|d| (d.name.clone(), json!(d.kind.type_name())))
            .collect::<serde_json::Map<String, NodeValue>>();

        json!({
            "input": {
                "required": group(&self.required),
                "optional": group(&self.optional),
                "hidden": hidden,
            },
            "input_order": {
                "required": self.required.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
                "optional": self.optional.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
                "hidden": self.hidden.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            },
            "output": self.output_types(),
            "output_is_list": self.output_is_list(),
            "output_name": self.output_names(),
        })
    }
}
