//! The facade trait a hosting framework instantiates.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::registry::ToolRegistry;
use crate::result::CallResult;
use crate::tool::ToolArgs;

/// A pluggable tool module as seen by the hosting framework.
///
/// The host constructs the pipeline once, reads its identity and valves for
/// display, enumerates the registry, and dispatches capabilities by name.
/// There is no reconfiguration API: valve overrides are applied at
/// construction.
#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Display name shown by the host.
    fn name(&self) -> &str;

    /// Optional stable identifier for multi-instance disambiguation.
    fn id(&self) -> Option<&str> {
        None
    }

    /// The capabilities this pipeline exposes.
    fn registry(&self) -> &ToolRegistry;

    /// Snapshot of the current valves as a JSON object, for display/editing.
    fn valves(&self) -> Map<String, Value>;

    /// Dispatch a capability by name. Forwards to the registry.
    async fn dispatch(&self, name: &str, args: ToolArgs) -> CallResult {
        self.registry().dispatch(name, args).await
    }
}
