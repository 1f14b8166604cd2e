//! Core contract for tool plugins in a chat pipeline host.
//!
//! This crate provides the shared interface between a hosting chat framework
//! and a pluggable tool module. It defines:
//!
//! - [`CapabilityDescriptor`] - Metadata describing one callable tool
//! - [`ToolRegistry`] - Ordered registry with dispatch-by-name
//! - [`Tool`] / [`ToolArgs`] - The handler trait and its argument bag
//! - [`CallResult`] / [`ToolOutput`] - The uniform success/failure result shape
//! - [`ValveSet`] - Merge machinery for user-editable configuration ("valves")
//! - [`Pipeline`] - The facade trait a host instantiates and introspects
//!
//! # Example
//!
//! ```rust
//! use pipeline_core::{
//!     async_trait, CapabilityDescriptor, ParamType, Tool, ToolArgs, ToolError,
//!     ToolOutput, ToolRegistry,
//! };
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl Tool for Echo {
//!     fn descriptor(&self) -> CapabilityDescriptor {
//!         CapabilityDescriptor::new("echo", "Echoes back the input")
//!             .param("message", ParamType::String, "Text to echo")
//!     }
//!
//!     async fn call(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
//!         Ok(ToolOutput::text(args.require_str("message")?))
//!     }
//! }
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Echo).unwrap();
//! assert!(registry.contains("echo"));
//! ```

mod capability;
mod error;
mod pipeline;
mod registry;
mod result;
mod tool;
mod valves;

pub use capability::{CapabilityDescriptor, ParamSpec, ParamType};
pub use error::{RegistryError, ToolError, ValveError};
pub use pipeline::Pipeline;
pub use registry::ToolRegistry;
pub use result::{CallResult, FailureKind, ToolOutput};
pub use tool::{Tool, ToolArgs};
pub use valves::{scope_matches, ValveSet, WILDCARD};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
