//! Error types for the tool-plugin contract.

use thiserror::Error;

use crate::result::FailureKind;

/// Errors a tool handler or call adapter can produce.
///
/// Every variant maps onto a [`FailureKind`], so a dispatch always yields a
/// well-formed failure instead of an unhandled fault.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Required configuration is missing; the message tells the user what to set.
    #[error("{0}")]
    Misconfigured(String),

    /// Network or HTTP failure (non-2xx status, connection error, timeout).
    #[error("{0}")]
    Transport(String),

    /// A named entity was absent from an external enumeration.
    #[error("{0}")]
    NotFound(String),

    /// Malformed input to a local computation.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ToolError {
    /// The failure kind this error surfaces as in a [`crate::CallResult`].
    pub fn kind(&self) -> FailureKind {
        match self {
            ToolError::Misconfigured(_) => FailureKind::Misconfigured,
            ToolError::Transport(_) => FailureKind::Transport,
            ToolError::NotFound(_) => FailureKind::NotFound,
            ToolError::InvalidInput(_)
            | ToolError::MissingParameter(_)
            | ToolError::InvalidParameter { .. } => FailureKind::InvalidInput,
        }
    }
}

/// Registry misuse, surfaced at registration time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("a tool named '{0}' is already registered")]
    DuplicateName(String),
}

/// Errors applying valve overrides.
#[derive(Debug, Error)]
pub enum ValveError {
    /// The override names a valve that does not exist.
    #[error("unknown valve '{0}'")]
    UnknownKey(String),

    /// The merged values do not form a valid valve set.
    #[error("invalid valve overrides: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ToolError::Misconfigured("set it".into()).kind(),
            FailureKind::Misconfigured
        );
        assert_eq!(
            ToolError::Transport("timed out".into()).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ToolError::NotFound("no such light".into()).kind(),
            FailureKind::NotFound
        );
        assert_eq!(
            ToolError::MissingParameter("name".into()).kind(),
            FailureKind::InvalidInput
        );
        assert_eq!(
            ToolError::InvalidParameter {
                name: "ip".into(),
                reason: "expected string".into()
            }
            .kind(),
            FailureKind::InvalidInput
        );
    }

    #[test]
    fn test_messages_are_short() {
        let err = ToolError::MissingParameter("expression".into());
        assert_eq!(err.to_string(), "Missing required parameter: expression");
    }
}
