//! The uniform result shape produced by every tool invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Output from a successful tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Short human-readable text relayed into the conversation.
    pub content: String,
    /// Optional structured payload for hosts that want more than text.
    pub data: Option<Value>,
}

impl ToolOutput {
    /// Create a plain-text output.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            data: None,
        }
    }

    /// Create an output carrying a structured payload alongside the text.
    pub fn structured(content: impl Into<String>, data: Value) -> Self {
        Self {
            content: content.into(),
            data: Some(data),
        }
    }
}

/// Classification of a failed tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Required configuration missing; recoverable by user action.
    Misconfigured,
    /// Network or HTTP failure.
    Transport,
    /// Named entity absent from an external enumeration.
    NotFound,
    /// Malformed input to a local computation or bad arguments.
    InvalidInput,
    /// No tool with the requested name is registered.
    UnknownCapability,
}

/// Result of dispatching a capability.
///
/// Nothing below the pipeline facade raises past dispatch; every outcome is
/// one of these two variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CallResult {
    Success(ToolOutput),
    Failure { kind: FailureKind, message: String },
}

impl CallResult {
    /// Create a failure result.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        CallResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }

    /// Convert a handler error into a failure result.
    pub fn from_error(err: ToolError) -> Self {
        CallResult::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// The failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The text a hosting conversation displays for this result.
    pub fn render(&self) -> &str {
        match self {
            CallResult::Success(output) => &output.content,
            CallResult::Failure { message, .. } => message,
        }
    }
}

impl From<Result<ToolOutput, ToolError>> for CallResult {
    fn from(result: Result<ToolOutput, ToolError>) -> Self {
        match result {
            Ok(output) => CallResult::Success(output),
            Err(err) => CallResult::Failure {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let ok = CallResult::Success(ToolOutput::text("2+2 = 4"));
        assert!(ok.is_success());
        assert_eq!(ok.render(), "2+2 = 4");

        let failed = CallResult::failure(FailureKind::NotFound, "No light named 'Desk'");
        assert!(!failed.is_success());
        assert_eq!(failed.failure_kind(), Some(FailureKind::NotFound));
        assert_eq!(failed.render(), "No light named 'Desk'");
    }

    #[test]
    fn test_from_handler_result() {
        let result: CallResult = Err(ToolError::Transport("connection refused".into())).into();
        assert_eq!(result.failure_kind(), Some(FailureKind::Transport));

        let result: CallResult = Ok(ToolOutput::text("done")).into();
        assert!(result.is_success());
    }
}
