/// Represents an issue found while checking a schema, a capability binding or an input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A hard error: the node cannot be registered or the invocation cannot proceed.
    Error(String),
    /// A warning: something looks off but the host would still accept it.
    Warning(String),
}

/// The result of a validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.issues.push(ValidationIssue::Error(msg.into()));
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.issues.push(ValidationIssue::Warning(msg.into()));
    }

    /// Appends every issue of `other`.
    pub fn extend(&mut self, other: ValidationResult) {
        self.issues.extend(other.issues);
    }

    pub fn is_safe(&self) -> bool {
        !self.issues.iter().any(|i| matches!(i, ValidationIssue::Error(_)))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| matches!(i, ValidationIssue::Warning(_)))
    }

    pub fn errors(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter_map(|i| match i {
                ValidationIssue::Error(msg) => Some(msg.as_str()),
                ValidationIssue::Warning(_) => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter_map(|i| match i {
                ValidationIssue::Warning(msg) => Some(msg.as_str()),
                ValidationIssue::Error(_) => None,
            })
            .collect()
    }

    /// Joins all errors into the single message the host surfaces, or `None` when safe.
    pub fn error_message(&self) -> Option<String> {
        let errors = self.errors();
        if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        }
    }

    pub fn log_summary(&self) {
        for issue in &self.issues {
            match issue {
                ValidationIssue::Error(msg) => log::error!("{}", msg),
                ValidationIssue::Warning(msg) => log::warn!("{}", msg),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_make_result_unsafe() {
        let mut result = ValidationResult::new();
        assert!(result.is_safe());
        assert_eq!(result.error_message(), None);

        result.add_warning("input 'x' is never read");
        assert!(result.is_safe());
        assert!(result.has_warnings());

        result.add_error("first");
        result.add_error("second");
        assert!(!result.is_safe());
        assert_eq!(result.error_message(), Some("first; second".to_string()));
        assert_eq!(result.warnings(), vec!["input 'x' is never read"]);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut a = ValidationResult::new();
        a.add_error("a");
        let mut b = ValidationResult::new();
        b.add_warning("b");
        b.add_error("c");

        a.extend(b);
        assert_eq!(
            a.issues,
            vec![
                ValidationIssue::Error("a".into()),
                ValidationIssue::Warning("b".into()),
                ValidationIssue::Error("c".into()),
            ]
        );
    }
}
