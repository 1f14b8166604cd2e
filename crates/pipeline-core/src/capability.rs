//! Capability descriptors for tool introspection.
//!
//! A hosting framework reads descriptors to learn which tools a pipeline
//! exposes and what arguments each takes, typically to present them to a
//! language model as function schemas.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Parameter value types a capability can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    /// The JSON Schema type name for this parameter type.
    pub fn schema_name(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }

    /// Whether a JSON value conforms to this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

/// One declared parameter of a capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    name: String,
    param_type: ParamType,
    required: bool,
    description: String,
}

impl ParamSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Metadata describing one callable tool.
///
/// Descriptors are immutable value objects built once at registration time.
/// Parameters keep their declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    name: String,
    description: String,
    parameters: Vec<ParamSpec>,
}

impl CapabilityDescriptor {
    /// Create a descriptor with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Declare a required parameter.
    pub fn param(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.push(ParamSpec {
            name: name.into(),
            param_type,
            required: true,
            description: description.into(),
        });
        self
    }

    /// Declare an optional parameter.
    pub fn optional_param(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.push(ParamSpec {
            name: name.into(),
            param_type,
            required: false,
            description: description.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    /// Render the descriptor as an OpenAI-style function definition.
    ///
    /// Hosting frameworks hand this straight to a model as the tool schema.
    pub fn to_function_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.schema_name(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_order_preserved() {
        let descriptor = CapabilityDescriptor::new("demo", "A demo tool")
            .param("first", ParamType::String, "First")
            .optional_param("second", ParamType::Number, "Second")
            .param("third", ParamType::Boolean, "Third");

        let names: Vec<&str> = descriptor.parameters().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(descriptor.parameters()[0].required());
        assert!(!descriptor.parameters()[1].required());
    }

    #[test]
    fn test_function_schema() {
        let descriptor = CapabilityDescriptor::new("turn_on_light", "Turn on a light by name")
            .param("name", ParamType::String, "Friendly name of the light");

        let schema = descriptor.to_function_schema();
        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "turn_on_light");
        assert_eq!(
            schema["function"]["parameters"]["properties"]["name"]["type"],
            "string"
        );
        assert_eq!(
            schema["function"]["parameters"]["required"],
            json!(["name"])
        );
    }

    #[test]
    fn test_param_type_matches() {
        assert!(ParamType::String.matches(&json!("hi")));
        assert!(!ParamType::String.matches(&json!(3)));
        assert!(ParamType::Number.matches(&json!(3.5)));
        assert!(ParamType::Number.matches(&json!(3)));
        assert!(ParamType::Integer.matches(&json!(3)));
        assert!(!ParamType::Integer.matches(&json!(3.5)));
        assert!(ParamType::Boolean.matches(&json!(true)));
    }
}
