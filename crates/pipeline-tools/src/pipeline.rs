//! The facade the hosting framework instantiates.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use pipeline_core::{Pipeline, RegistryError, ToolRegistry, ValveError, ValveSet};

use crate::http::HttpAdapter;
use crate::tools::{
    Calculator, CurrentTime, LightsApi, ListLights, LocateIp, TurnOffLight, TurnOnLight,
};
use crate::valves::Valves;

/// Errors constructing the pipeline.
#[derive(Debug, Error)]
pub enum PipelineBuildError {
    #[error(transparent)]
    Valves(#[from] ValveError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The built-in tool pipeline: clock, calculator, lights, geolocation.
///
/// Valve overrides are merged once at construction; every tool receives its
/// dependencies (valves, HTTP adapter) explicitly.
pub struct ToolsPipeline {
    name: String,
    id: Option<String>,
    valves: Arc<Valves>,
    registry: ToolRegistry,
}

impl ToolsPipeline {
    /// Build with default valves.
    pub fn new() -> Result<Self, PipelineBuildError> {
        Self::with_overrides(&Map::new())
    }

    /// Build with host-supplied valve overrides.
    pub fn with_overrides(overrides: &Map<String, Value>) -> Result<Self, PipelineBuildError> {
        let valves = Arc::new(Valves::defaults().merge(overrides)?);
        let http = HttpAdapter::new();
        let lights = LightsApi::new(http.clone(), valves.clone());

        let mut registry = ToolRegistry::new();
        registry.register(CurrentTime::new(valves.clone(), http.clone()))?;
        registry.register(Calculator::new())?;
        registry.register(ListLights::new(lights.clone()))?;
        registry.register(TurnOnLight::new(lights.clone()))?;
        registry.register(TurnOffLight::new(lights))?;
        registry.register(LocateIp::new(valves.clone(), http))?;

        let name = "Everyday Tools".to_string();
        info!(
            "Pipeline '{}' initialized with {} tools",
            name,
            registry.len()
        );

        Ok(Self {
            name,
            id: None,
            valves,
            registry,
        })
    }

    /// Set a stable identifier for multi-instance disambiguation.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The merged valves this pipeline runs with.
    pub fn valve_set(&self) -> &Valves {
        &self.valves
    }
}

#[async_trait]
impl Pipeline for ToolsPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    fn valves(&self) -> Map<String, Value> {
        self.valves.to_object()
    }
}
