//! User-editable configuration for the built-in tool pipeline.

use chrono::FixedOffset;
use pipeline_core::{ToolError, ValveSet, WILDCARD};
use serde::{Deserialize, Serialize};

/// How the current-time tool picks its clock and zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeSource {
    /// System clock in the system's local zone.
    Local,
    /// System clock rendered at a fixed UTC offset.
    Fixed(FixedOffset),
    /// Zone resolved from the caller's IP geolocation.
    IpGeolocation,
}

/// Valves for the built-in tool pipeline.
///
/// All values default to a usable-but-unconfigured state: the clock and
/// calculator work out of the box, the lights tools tell the user which
/// valve to set before they make any network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Valves {
    /// Pipelines this plugin attaches to; `"*"` means all.
    pub pipelines: Vec<String>,
    /// Base URL of the Home Assistant instance, e.g. `http://homeassistant.local:8123`.
    pub home_assistant_url: String,
    /// Long-lived Home Assistant access token.
    pub home_assistant_token: String,
    /// Optional ipinfo.io token; unauthenticated access works at a lower rate limit.
    pub ipinfo_token: String,
    /// Time source strategy: `local`, `fixed`, or `ip`.
    pub time_source: String,
    /// UTC offset in minutes, used when `time_source` is `fixed`.
    pub utc_offset_minutes: i32,
}

impl Default for Valves {
    fn default() -> Self {
        Self {
            pipelines: vec![WILDCARD.to_string()],
            home_assistant_url: String::new(),
            home_assistant_token: String::new(),
            ipinfo_token: String::new(),
            time_source: "local".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl ValveSet for Valves {}

impl Valves {
    /// Parse the `time_source` valve into a strategy.
    pub fn time_strategy(&self) -> Result<TimeSource, ToolError> {
        match self.time_source.as_str() {
            "local" => Ok(TimeSource::Local),
            "fixed" => {
                let offset = FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(
                    || {
                        ToolError::InvalidInput(format!(
                            "utc_offset_minutes {} is out of range",
                            self.utc_offset_minutes
                        ))
                    },
                )?;
                Ok(TimeSource::Fixed(offset))
            }
            "ip" => Ok(TimeSource::IpGeolocation),
            other => Err(ToolError::InvalidInput(format!(
                "Unknown time_source '{other}'; expected local, fixed, or ip"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_core::scope_matches;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let valves = Valves::defaults();
        assert_eq!(valves.pipelines, vec!["*".to_string()]);
        assert!(valves.home_assistant_url.is_empty());
        assert!(valves.home_assistant_token.is_empty());
        assert_eq!(valves.time_source, "local");
        assert!(scope_matches(&valves.pipelines, "any_pipeline"));
    }

    #[test]
    fn test_merge_overrides() {
        let overrides = json!({
            "home_assistant_url": "http://homeassistant.local:8123",
            "home_assistant_token": "abc123",
        });
        let merged = Valves::defaults()
            .merge(overrides.as_object().unwrap())
            .unwrap();

        assert_eq!(merged.home_assistant_url, "http://homeassistant.local:8123");
        assert_eq!(merged.home_assistant_token, "abc123");
        // Untouched keys keep defaults
        assert_eq!(merged.time_source, "local");
        assert_eq!(merged.pipelines, vec!["*".to_string()]);
    }

    #[test]
    fn test_time_strategy() {
        let mut valves = Valves::defaults();
        assert_eq!(valves.time_strategy().unwrap(), TimeSource::Local);

        valves.time_source = "fixed".to_string();
        valves.utc_offset_minutes = -300;
        match valves.time_strategy().unwrap() {
            TimeSource::Fixed(offset) => assert_eq!(offset.local_minus_utc(), -300 * 60),
            other => panic!("expected fixed, got {other:?}"),
        }

        valves.time_source = "ip".to_string();
        assert_eq!(valves.time_strategy().unwrap(), TimeSource::IpGeolocation);

        valves.time_source = "sundial".to_string();
        assert!(matches!(
            valves.time_strategy(),
            Err(ToolError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fixed_offset_out_of_range() {
        let mut valves = Valves::defaults();
        valves.time_source = "fixed".to_string();
        valves.utc_offset_minutes = 100_000;
        assert!(matches!(
            valves.time_strategy(),
            Err(ToolError::InvalidInput(_))
        ));
    }
}
