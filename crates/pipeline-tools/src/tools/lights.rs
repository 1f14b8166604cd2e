//! Smart-home light tools backed by the Home Assistant REST API.
//!
//! Mutating calls follow the enumeration-then-resolve pattern: fetch the
//! light states, map friendly names to entity ids, resolve the target, and
//! only then issue the service call. An unresolvable name never triggers a
//! mutating request.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use pipeline_core::{CapabilityDescriptor, ParamType, Tool, ToolArgs, ToolError, ToolOutput};

use crate::http::{join_base, HttpAdapter};
use crate::valves::Valves;

/// One entry from the Home Assistant `/api/states` enumeration.
#[derive(Debug, Deserialize)]
struct StateEntry {
    entity_id: String,
    state: String,
    #[serde(default)]
    attributes: StateAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct StateAttributes {
    #[serde(default)]
    friendly_name: Option<String>,
}

/// A controllable light, keyed by friendly name in the enumeration map.
#[derive(Debug, Clone, PartialEq)]
pub struct LightState {
    pub entity_id: String,
    pub state: String,
}

/// Extract the lights from a `/api/states` response, in enumeration order.
pub fn parse_lights(states: Value) -> Result<IndexMap<String, LightState>, ToolError> {
    let entries: Vec<StateEntry> = serde_json::from_value(states).map_err(|e| {
        ToolError::Transport(format!("Unexpected response from Home Assistant: {e}"))
    })?;

    let mut lights = IndexMap::new();
    for entry in entries {
        let Some(object_id) = entry.entity_id.strip_prefix("light.") else {
            continue;
        };
        let name = entry
            .attributes
            .friendly_name
            .unwrap_or_else(|| object_id.to_string());
        lights.insert(
            name,
            LightState {
                entity_id: entry.entity_id,
                state: entry.state,
            },
        );
    }
    Ok(lights)
}

/// Resolve a friendly name to a light, case-insensitively.
pub fn resolve_entity<'a>(
    lights: &'a IndexMap<String, LightState>,
    name: &str,
) -> Option<&'a LightState> {
    lights
        .get(name)
        .or_else(|| {
            lights
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, light)| light)
        })
}

/// Render the enumeration for the conversation.
pub fn render_lights(lights: &IndexMap<String, LightState>) -> String {
    if lights.is_empty() {
        return "No lights found".to_string();
    }
    lights
        .iter()
        .map(|(name, light)| format!("- {} ({}): {}", name, light.entity_id, light.state))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Adapter for the Home Assistant REST API.
#[derive(Clone)]
pub struct LightsApi {
    http: HttpAdapter,
    valves: Arc<Valves>,
}

impl LightsApi {
    pub fn new(http: HttpAdapter, valves: Arc<Valves>) -> Self {
        Self { http, valves }
    }

    /// Both valves must be set before any request is attempted.
    fn require_config(&self) -> Result<(&str, &str), ToolError> {
        if self.valves.home_assistant_url.is_empty() {
            return Err(ToolError::Misconfigured(
                "The Home Assistant URL is not set. Set the home_assistant_url valve to your \
                 instance URL, e.g. http://homeassistant.local:8123"
                    .to_string(),
            ));
        }
        if self.valves.home_assistant_token.is_empty() {
            return Err(ToolError::Misconfigured(
                "The Home Assistant token is not set. Create a long-lived access token in Home \
                 Assistant and set the home_assistant_token valve"
                    .to_string(),
            ));
        }
        Ok((
            &self.valves.home_assistant_url,
            &self.valves.home_assistant_token,
        ))
    }

    /// Fetch all lights, keyed by friendly name in enumeration order.
    pub async fn fetch_lights(&self) -> Result<IndexMap<String, LightState>, ToolError> {
        let (base, token) = self.require_config()?;
        let url = join_base(base, "home_assistant_url", "api/states")?;
        let states = self.http.get_json(&url, Some(token)).await?;
        parse_lights(states)
    }

    /// Invoke a light service (`turn_on` / `turn_off`) for an entity id.
    pub async fn call_service(&self, service: &str, entity_id: &str) -> Result<(), ToolError> {
        let (base, token) = self.require_config()?;
        let url = join_base(
            base,
            "home_assistant_url",
            &format!("api/services/light/{service}"),
        )?;
        debug!("Calling light.{} for {}", service, entity_id);
        self.http
            .post_json(&url, Some(token), &json!({ "entity_id": entity_id }))
            .await?;
        Ok(())
    }

    /// Resolve a friendly name, then toggle the light.
    async fn switch(&self, name: &str, service: &str) -> Result<ToolOutput, ToolError> {
        let lights = self.fetch_lights().await?;
        let light = resolve_entity(&lights, name).ok_or_else(|| {
            ToolError::NotFound(format!("No light named '{name}' was found"))
        })?;
        let entity_id = light.entity_id.clone();
        self.call_service(service, &entity_id).await?;
        let verb = if service == "turn_on" { "on" } else { "off" };
        Ok(ToolOutput::text(format!(
            "Turned {verb} {name} ({entity_id})"
        )))
    }
}

/// Lists the lights Home Assistant knows about.
pub struct ListLights {
    api: LightsApi,
}

impl ListLights {
    pub fn new(api: LightsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for ListLights {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "list_lights",
            "Lists all smart-home lights with their entity ids and current state.",
        )
    }

    async fn call(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let lights = self.api.fetch_lights().await?;
        Ok(ToolOutput::text(render_lights(&lights)))
    }
}

/// Turns on a light by friendly name.
pub struct TurnOnLight {
    api: LightsApi,
}

impl TurnOnLight {
    pub fn new(api: LightsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for TurnOnLight {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new("turn_on_light", "Turns on a light by its friendly name.")
            .param("name", ParamType::String, "Friendly name of the light")
    }

    async fn call(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let name = args.require_str("name")?;
        self.api.switch(&name, "turn_on").await
    }
}

/// Turns off a light by friendly name.
pub struct TurnOffLight {
    api: LightsApi,
}

impl TurnOffLight {
    pub fn new(api: LightsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for TurnOffLight {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new("turn_off_light", "Turns off a light by its friendly name.")
            .param("name", ParamType::String, "Friendly name of the light")
    }

    async fn call(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let name = args.require_str("name")?;
        self.api.switch(&name, "turn_off").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Value {
        json!([
            {
                "entity_id": "light.lamp1",
                "state": "on",
                "attributes": {"friendly_name": "Lamp"}
            },
            {
                "entity_id": "sensor.outside_temp",
                "state": "21.5",
                "attributes": {"friendly_name": "Outside Temperature"}
            },
            {
                "entity_id": "light.kitchen_strip",
                "state": "off",
                "attributes": {}
            }
        ])
    }

    #[test]
    fn test_parse_lights_filters_and_orders() {
        let lights = parse_lights(fixture()).unwrap();

        let names: Vec<&String> = lights.keys().collect();
        assert_eq!(names, vec!["Lamp", "kitchen_strip"]);
        assert_eq!(lights["Lamp"].entity_id, "light.lamp1");
        assert_eq!(lights["Lamp"].state, "on");
        // No friendly_name falls back to the object id
        assert_eq!(lights["kitchen_strip"].entity_id, "light.kitchen_strip");
    }

    #[test]
    fn test_parse_lights_rejects_garbage() {
        assert!(matches!(
            parse_lights(json!({"not": "an array"})),
            Err(ToolError::Transport(_))
        ));
    }

    #[test]
    fn test_resolve_entity() {
        let lights = parse_lights(fixture()).unwrap();

        assert_eq!(
            resolve_entity(&lights, "Lamp").map(|l| l.entity_id.as_str()),
            Some("light.lamp1")
        );
        assert_eq!(
            resolve_entity(&lights, "lamp").map(|l| l.entity_id.as_str()),
            Some("light.lamp1")
        );
        assert_eq!(resolve_entity(&lights, "Unknown"), None);
    }

    #[test]
    fn test_render_lights() {
        let lights = parse_lights(fixture()).unwrap();
        assert_eq!(
            render_lights(&lights),
            "- Lamp (light.lamp1): on\n- kitchen_strip (light.kitchen_strip): off"
        );
        assert_eq!(render_lights(&IndexMap::new()), "No lights found");
    }

    #[tokio::test]
    async fn test_unconfigured_tools_never_touch_the_network() {
        // Default valves have no URL or token; the tools must fail with
        // Misconfigured before any request is built.
        let api = LightsApi::new(HttpAdapter::new(), Arc::new(Valves::default()));

        let err = ListLights::new(api.clone())
            .call(ToolArgs::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Misconfigured(_)));

        let args = ToolArgs::new(json!({"name": "Lamp"}).as_object().unwrap().clone());
        let err = TurnOnLight::new(api).call(args).await.unwrap_err();
        assert!(matches!(err, ToolError::Misconfigured(_)));
    }

    #[tokio::test]
    async fn test_token_missing_is_named_in_the_message() {
        let mut valves = Valves::default();
        valves.home_assistant_url = "http://hub.local:8123".to_string();
        let api = LightsApi::new(HttpAdapter::new(), Arc::new(valves));

        let err = api.fetch_lights().await.unwrap_err();
        match err {
            ToolError::Misconfigured(message) => {
                assert!(message.contains("home_assistant_token"))
            }
            other => panic!("expected Misconfigured, got {other:?}"),
        }
    }
}
