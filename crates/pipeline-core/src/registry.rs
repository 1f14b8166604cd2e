//! Tool registry: ordered enumeration and dispatch-by-name.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::capability::CapabilityDescriptor;
use crate::error::{RegistryError, ToolError};
use crate::result::{CallResult, FailureKind};
use crate::tool::{Tool, ToolArgs};

struct RegisteredTool {
    descriptor: CapabilityDescriptor,
    handler: Arc<dyn Tool>,
}

/// Registry binding capability descriptors to executable handlers.
///
/// Enumeration order is registration order (IndexMap preserves insertion
/// order). Dispatch validates arguments against the descriptor before the
/// handler runs, and always returns a [`CallResult`].
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool, capturing its descriptor.
    ///
    /// Fails if a tool with the same name is already registered.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a shared tool handle.
    pub fn register_arc(&mut self, handler: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let descriptor = handler.descriptor();
        let name = descriptor.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        info!("Registering tool: {}", name);
        self.tools.insert(name, RegisteredTool { descriptor, handler });
        Ok(())
    }

    /// Descriptors of all registered tools, in registration order.
    pub fn list(&self) -> Vec<&CapabilityDescriptor> {
        self.tools.values().map(|t| &t.descriptor).collect()
    }

    /// Every descriptor rendered as an OpenAI-style function schema.
    pub fn function_schemas(&self) -> Vec<Value> {
        self.tools
            .values()
            .map(|t| t.descriptor.to_function_schema())
            .collect()
    }

    /// Name and description pairs for help text.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.tools
            .values()
            .map(|t| (t.descriptor.name(), t.descriptor.description()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a capability by name.
    ///
    /// An unknown name yields an `UnknownCapability` failure without invoking
    /// any handler. Arguments are validated against the descriptor first;
    /// violations yield `InvalidInput`, again without invoking the handler.
    /// No retry, timeout, or caching happens at this layer.
    pub async fn dispatch(&self, name: &str, args: ToolArgs) -> CallResult {
        let Some(entry) = self.tools.get(name) else {
            return CallResult::failure(
                FailureKind::UnknownCapability,
                format!("Unknown tool: {name}"),
            );
        };

        if let Err(err) = validate_args(&entry.descriptor, &args) {
            return CallResult::from_error(err);
        }

        debug!("Dispatching tool '{}'", name);
        let result: CallResult = entry.handler.call(args).await.into();
        debug!(
            "Tool '{}' completed: success={}",
            name,
            result.is_success()
        );
        result
    }

    /// Dispatch with arguments supplied as a raw JSON object string.
    pub async fn dispatch_json(&self, name: &str, args_json: &str) -> CallResult {
        match ToolArgs::from_json(args_json) {
            Ok(args) => self.dispatch(name, args).await,
            Err(err) => CallResult::from_error(err),
        }
    }
}

/// Check supplied arguments against the declared parameters.
fn validate_args(descriptor: &CapabilityDescriptor, args: &ToolArgs) -> Result<(), ToolError> {
    for param in descriptor.parameters() {
        match args.get(param.name()) {
            Some(value) => {
                if !param.param_type().matches(value) {
                    return Err(ToolError::InvalidParameter {
                        name: param.name().to_string(),
                        reason: format!("expected {}", param.param_type().schema_name()),
                    });
                }
            }
            None if param.required() => {
                return Err(ToolError::MissingParameter(param.name().to_string()));
            }
            None => {}
        }
    }
    Ok(())
}
