//! Built-in tool plugin for chat pipeline hosts.
//!
//! This crate implements the `pipeline-core` contract with a set of everyday
//! tools a chatbot can call. The facade is [`ToolsPipeline`]; hosts construct
//! it (optionally with valve overrides), enumerate its registry, and dispatch
//! capabilities by name.
//!
//! # Built-in Tools
//!
//! - [`CurrentTime`] - Current time with UTC offset; the zone strategy is
//!   selected by the `time_source` valve (local, fixed offset, or
//!   IP-geolocation derived).
//! - [`Calculator`] - Constrained arithmetic evaluation (literals and
//!   `+ - * / ^` only).
//! - [`ListLights`] / [`TurnOnLight`] / [`TurnOffLight`] - Smart-home light
//!   query and control via the Home Assistant REST API.
//! - [`LocateIp`] - IP-based geolocation and timezone via ipinfo.io.
//!
//! # Example
//!
//! ```rust,ignore
//! use pipeline_core::{Pipeline, ToolArgs};
//! use pipeline_tools::ToolsPipeline;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let overrides = json!({
//!         "home_assistant_url": "http://homeassistant.local:8123",
//!         "home_assistant_token": "...",
//!     });
//!     let pipeline = ToolsPipeline::with_overrides(overrides.as_object().unwrap()).unwrap();
//!
//!     let result = pipeline
//!         .dispatch("calculator", ToolArgs::from_json(r#"{"expression": "2+2"}"#).unwrap())
//!         .await;
//!     println!("{}", result.render()); // "2+2 = 4"
//! }
//! ```

pub mod eval;
mod http;
mod pipeline;
pub mod tools;
mod valves;

pub use http::{join_base, HttpAdapter};
pub use pipeline::{PipelineBuildError, ToolsPipeline};
pub use tools::{
    Calculator, CurrentTime, ListLights, LocateIp, TurnOffLight, TurnOnLight, ZoneTimeApi,
};
pub use valves::{TimeSource, Valves};

/// Build the pipeline with default valves.
pub fn default_pipeline() -> Result<ToolsPipeline, PipelineBuildError> {
    ToolsPipeline::new()
}
