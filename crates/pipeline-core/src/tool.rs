//! Tool trait definition and the argument bag handlers receive.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::capability::CapabilityDescriptor;
use crate::error::ToolError;
use crate::result::ToolOutput;

/// Arguments passed to a tool for execution.
///
/// A thin wrapper over a JSON object with typed accessors. Accessors return
/// [`ToolError::MissingParameter`] / [`ToolError::InvalidParameter`], which
/// surface as `InvalidInput` failures.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    params: Map<String, Value>,
}

impl ToolArgs {
    /// Create arguments from a JSON object.
    pub fn new(params: Map<String, Value>) -> Self {
        Self { params }
    }

    /// Create an empty argument bag.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse arguments from a raw JSON string; the string must be an object.
    pub fn from_json(raw: &str) -> Result<Self, ToolError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ToolError::InvalidInput(format!("Arguments are not valid JSON: {e}")))?;
        match value {
            Value::Object(params) => Ok(Self { params }),
            other => Err(ToolError::InvalidInput(format!(
                "Arguments must be a JSON object, got {other}"
            ))),
        }
    }

    /// Raw access to a parameter value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Get an optional string parameter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string parameter.
    pub fn require_str(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Get a required number parameter.
    pub fn require_f64(&self, key: &str) -> Result<f64, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_f64()
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected number".to_string(),
            })
    }

    /// Get an optional boolean parameter with a default.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.params
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }
}

/// Trait for tools dispatched by a pipeline's registry.
///
/// Handlers receive their dependencies (valves, call adapters) by explicit
/// injection at construction, never through a back-reference to the facade.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The capability this tool exposes. Captured once at registration.
    fn descriptor(&self) -> CapabilityDescriptor;

    /// Execute the tool with the given arguments.
    async fn call(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        match value {
            Value::Object(map) => ToolArgs::new(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_require_str() {
        let a = args(json!({"name": "Lamp"}));
        assert_eq!(a.require_str("name").unwrap(), "Lamp");

        let err = a.require_str("missing").unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(_)));

        let a = args(json!({"name": 42}));
        let err = a.require_str("name").unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { .. }));
    }

    #[test]
    fn test_require_f64_and_bool_or() {
        let a = args(json!({"offset": 90, "verbose": true}));
        assert_eq!(a.require_f64("offset").unwrap(), 90.0);
        assert!(a.get_bool_or("verbose", false));
        assert!(a.get_bool_or("absent", true));
    }

    #[test]
    fn test_from_json() {
        let a = ToolArgs::from_json(r#"{"expression": "2+2"}"#).unwrap();
        assert_eq!(a.get_str("expression"), Some("2+2"));

        assert!(matches!(
            ToolArgs::from_json("not json"),
            Err(ToolError::InvalidInput(_))
        ));
        assert!(matches!(
            ToolArgs::from_json("[1, 2]"),
            Err(ToolError::InvalidInput(_))
        ));
    }
}
