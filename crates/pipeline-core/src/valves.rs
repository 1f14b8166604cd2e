//! Valve (configuration) merge machinery.
//!
//! "Valves" are the user-editable runtime parameters of a pipeline. A host
//! supplies overrides as a JSON object; merging layers them over the defaults
//! atomically through a serde round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValveError;

/// Marker meaning "apply to all pipelines" in a scope list.
pub const WILDCARD: &str = "*";

/// Whether a scope list covers the given pipeline id.
pub fn scope_matches(scopes: &[String], id: &str) -> bool {
    scopes.iter().any(|s| s == WILDCARD || s == id)
}

/// A named set of configuration values with defaulting and override-merging.
///
/// Implemented by plain serde structs; all methods are provided. `merge` is
/// atomic over the whole key set: an unknown key or a type mismatch rejects
/// the entire override and leaves the current values untouched.
pub trait ValveSet: Default + Clone + Serialize + DeserializeOwned {
    /// The built-in defaults.
    fn defaults() -> Self {
        Self::default()
    }

    /// Layer `overrides` over the current values, returning the merged set.
    ///
    /// Every key present in `overrides` replaces the current value; keys
    /// absent from the override keep their values.
    fn merge(&self, overrides: &Map<String, Value>) -> Result<Self, ValveError> {
        if overrides.is_empty() {
            return Ok(self.clone());
        }

        let mut object = match serde_json::to_value(self) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                return Err(ValveError::Invalid(
                    "valve set must serialize to an object".to_string(),
                ))
            }
            Err(e) => return Err(ValveError::Invalid(e.to_string())),
        };

        for (key, value) in overrides {
            match object.get_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => return Err(ValveError::UnknownKey(key.clone())),
            }
        }

        serde_json::from_value(Value::Object(object)).map_err(|e| ValveError::Invalid(e.to_string()))
    }

    /// Read a single value by key.
    fn get(&self, key: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(object)) => object.get(key).cloned(),
            _ => None,
        }
    }

    /// The full set as a JSON object, for host display and editing.
    fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(object)) => object,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct TestValves {
        api_url: String,
        api_token: String,
        retries: u32,
        pipelines: Vec<String>,
    }

    impl Default for TestValves {
        fn default() -> Self {
            Self {
                api_url: String::new(),
                api_token: String::new(),
                retries: 3,
                pipelines: vec![WILDCARD.to_string()],
            }
        }
    }

    impl ValveSet for TestValves {}

    fn overrides(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_merge_replaces_only_named_keys() {
        let merged = TestValves::defaults()
            .merge(&overrides(json!({"api_url": "http://hub.local:8123"})))
            .unwrap();

        assert_eq!(merged.api_url, "http://hub.local:8123");
        assert_eq!(merged.api_token, "");
        assert_eq!(merged.retries, 3);
        assert_eq!(merged.pipelines, vec![WILDCARD.to_string()]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = overrides(json!({"api_url": "http://hub.local", "retries": 5}));
        let once = TestValves::defaults().merge(&a).unwrap();
        let twice = once.merge(&a).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_rejects_unknown_key() {
        let err = TestValves::defaults()
            .merge(&overrides(json!({"api_urll": "typo"})))
            .unwrap_err();
        assert!(matches!(err, ValveError::UnknownKey(_)));
    }

    #[test]
    fn test_merge_is_atomic_on_type_mismatch() {
        let base = TestValves::defaults();
        let err = base
            .merge(&overrides(json!({"api_url": "ok", "retries": "five"})))
            .unwrap_err();
        assert!(matches!(err, ValveError::Invalid(_)));
        // Original untouched
        assert_eq!(base, TestValves::defaults());
    }

    #[test]
    fn test_get() {
        let valves = TestValves::defaults();
        assert_eq!(valves.get("retries"), Some(json!(3)));
        assert_eq!(valves.get("nope"), None);
    }

    #[test]
    fn test_scope_matches() {
        let all = vec![WILDCARD.to_string()];
        assert!(scope_matches(&all, "any_pipeline"));

        let some = vec!["chat_main".to_string()];
        assert!(scope_matches(&some, "chat_main"));
        assert!(!scope_matches(&some, "other"));
        assert!(!scope_matches(&[], "chat_main"));
    }
}
