use std::fmt;

use thiserror::Error;

/// Error type for dbapi operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// A driver has not supplied a required contract operation.
    /// Carries the operation name and the offending type so the failure
    /// is never a generic one.
    #[error("operation `{operation}` is not implemented for `{type_name}`")]
    NotImplemented {
        operation: &'static str,
        type_name: &'static str,
    },

    /// Parameter columns passed to a batch execution have inconsistent
    /// lengths. Raised before any row executes.
    #[error("parameter column `{column}` has {actual} value(s), expected {expected}")]
    ParameterMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column position {position} out of range for row with {columns} column(s)")]
    PositionOutOfRange { position: usize, columns: usize },

    /// Generic backend-reported failure that fits no more specific kind.
    #[error("driver error: {0}")]
    Driver(String),
}

impl DbError {
    /// Shorthand used by the contract traits' fallback implementations.
    pub fn not_implemented(operation: &'static str, type_name: &'static str) -> Self {
        DbError::NotImplemented {
            operation,
            type_name,
        }
    }
}

/// Result type alias for dbapi operations.
pub type Result<T> = std::result::Result<T, DbError>;

/// Non-fatal advisory emitted by a backend operation.
///
/// A `Warning` is informational only and is never raised as a failure;
/// drivers attach warnings to results for the caller to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_implemented_names_operation_and_type() {
        struct Opaque;
        let err = DbError::not_implemented("last_row_id", std::any::type_name::<Opaque>());
        let rendered = err.to_string();
        assert!(rendered.contains("last_row_id"));
        assert!(rendered.contains("Opaque"));
    }

    #[test]
    fn warning_is_a_plain_carrier() {
        let warn = Warning::new("1 row truncated");
        assert_eq!(warn.to_string(), "warning: 1 row truncated");
    }
}
