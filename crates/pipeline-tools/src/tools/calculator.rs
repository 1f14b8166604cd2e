//! Calculator tool over the constrained arithmetic evaluator.

use async_trait::async_trait;
use tracing::debug;

use pipeline_core::{CapabilityDescriptor, ParamType, Tool, ToolArgs, ToolError, ToolOutput};

use crate::eval::{evaluate, format_number};

/// Evaluates arithmetic expressions.
///
/// Accepts numeric literals, `+ - * / ^`, unary minus, and parentheses.
/// Anything else is rejected as invalid input.
///
/// # Parameters
///
/// - `expression` (required): The expression to evaluate.
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for Calculator {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "calculator",
            "Evaluates an arithmetic expression. Supports +, -, *, /, ^, and parentheses.",
        )
        .param(
            "expression",
            ParamType::String,
            "The arithmetic expression to evaluate, e.g. \"2 + 2 * 3\"",
        )
    }

    async fn call(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let expression = args.require_str("expression")?;

        debug!("Evaluating expression: {}", expression);
        let result = evaluate(&expression)?;

        Ok(ToolOutput::text(format!(
            "{} = {}",
            expression,
            format_number(result)
        )))
    }
}
