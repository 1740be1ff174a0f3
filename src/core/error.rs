// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rosua.
//!
//! Provides error types for the bridge:
//! - ROS definition parsing
//! - Schema document building and installation
//! - Address-space and registrar collaborator failures

use std::fmt;

/// Errors that can occur while bridging ROS types and an OPC UA address space.
#[derive(Debug, Clone)]
pub enum BridgeError {
    /// A collaborator (registrar or address space) rejected an operation.
    ///
    /// This is the only error kind surfaced by the core entry points for
    /// failures outside the bridge itself. No retry or rollback is attempted.
    Collaborator {
        /// Operation that failed (e.g. "instantiate", "write_value")
        operation: String,
        /// Node or type the operation targeted
        target: String,
        /// Reason reported by the collaborator
        reason: String,
    },

    /// Parse error in a `.msg` / `.srv` definition
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Invalid schema
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Type not found in registry
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Schema document serialization or deserialization failed
    Dictionary {
        /// Error message
        message: String,
    },

    /// Internal ordering guarantee broken
    InvariantViolation {
        /// Description of the invariant that was violated
        invariant: String,
    },

    /// Other error
    Other(String),
}

impl BridgeError {
    /// Create a collaborator failure.
    pub fn collaborator(
        operation: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BridgeError::Collaborator {
            operation: operation.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        BridgeError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        BridgeError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a schema document error.
    pub fn dictionary(message: impl Into<String>) -> Self {
        BridgeError::Dictionary {
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant_violation(invariant: impl Into<String>) -> Self {
        BridgeError::InvariantViolation {
            invariant: invariant.into(),
        }
    }

    /// Whether this error came from a collaborator call.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, BridgeError::Collaborator { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            BridgeError::Collaborator {
                operation,
                target,
                reason,
            } => vec![
                ("operation", operation.clone()),
                ("target", target.clone()),
                ("reason", reason.clone()),
            ],
            BridgeError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            BridgeError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            BridgeError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            BridgeError::Dictionary { message } => vec![("message", message.clone())],
            BridgeError::InvariantViolation { invariant } => {
                vec![("invariant", invariant.clone())]
            }
            BridgeError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Collaborator {
                operation,
                target,
                reason,
            } => write!(f, "Collaborator failed in {operation} on '{target}': {reason}"),
            BridgeError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            BridgeError::InvalidSchema {
                schema_name,
                reason,
            } => write!(f, "Invalid schema '{schema_name}': {reason}"),
            BridgeError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            BridgeError::Dictionary { message } => {
                write!(f, "Schema dictionary error: {message}")
            }
            BridgeError::InvariantViolation { invariant } => {
                write!(f, "Invariant violation: {invariant}")
            }
            BridgeError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Other(format!("IO error: {err}"))
    }
}

/// Result type for rosua operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_error() {
        let err = BridgeError::collaborator("write_value", "ns=2;i=7", "node is read-only");
        assert!(err.is_collaborator());
        assert_eq!(
            err.to_string(),
            "Collaborator failed in write_value on 'ns=2;i=7': node is read-only"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = BridgeError::parse("msg definition", "unexpected token");
        assert!(matches!(err, BridgeError::ParseError { .. }));
        assert!(!err.is_collaborator());
        assert_eq!(
            err.to_string(),
            "Parse error in msg definition: unexpected token"
        );
    }

    #[test]
    fn test_type_not_found_error() {
        let err = BridgeError::type_not_found("geometry_msgs/Point");
        assert_eq!(err.to_string(), "Type not found: 'geometry_msgs/Point'");
    }

    #[test]
    fn test_dictionary_error() {
        let err = BridgeError::dictionary("bad xml");
        assert_eq!(err.to_string(), "Schema dictionary error: bad xml");
    }

    #[test]
    fn test_log_fields_collaborator() {
        let err = BridgeError::collaborator("delete_node", "ns=2;i=9", "unknown node");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("operation", "delete_node".to_string()));
        assert_eq!(fields[1], ("target", "ns=2;i=9".to_string()));
        assert_eq!(fields[2], ("reason", "unknown node".to_string()));
    }

    #[test]
    fn test_log_fields_invalid_schema() {
        let err = BridgeError::invalid_schema("pkg/Msg", "empty name");
        let fields = err.log_fields();
        assert_eq!(fields[0], ("schema", "pkg/Msg".to_string()));
        assert_eq!(fields[1], ("reason", "empty name".to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BridgeError = io_err.into();
        assert_eq!(err.to_string(), "Other error: IO error: file not found");
    }
}
