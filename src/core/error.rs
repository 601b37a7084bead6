use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    /// Malformed schema, or a capability binding to a name the schema does not declare.
    #[error("Schema declaration error: {0}")]
    SchemaDeclaration(String),

    #[error("Duplicate node identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Node identifier collision: {}", .0.join(", "))]
    IdentifierCollision(Vec<String>),

    #[error("Input '{0}' is missing")]
    MissingInput(String),

    #[error("Input '{name}' has the wrong type, expected {expected}")]
    InputType { name: String, expected: String },

    /// The single combined message returned by a validator. It is never
    /// attributed to a specific input.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Processing failed: {0}")]
    Processing(String),

    #[error("Output arity mismatch: expected {expected} values, got {found}")]
    OutputArity { expected: usize, found: usize },

    #[error("Output '{name}' at position {index} is declared as a list but a scalar was returned")]
    OutputNotList { name: String, index: usize },
}
