use log::debug;
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::models::dashboard::DashboardState;

/// Serialize the full state to the persisted JSON snapshot.
pub fn encode(state: &DashboardState) -> Result<String, CoreError> {
    serde_json::to_string(state)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize dashboard: {e}")))
}

/// Parse a persisted snapshot.
///
/// Top-level fields present in the snapshot override the defaults and
/// missing ones fall back to them (a shallow merge). `null` counts as
/// missing. The merged state is then normalized: the six markets in fixed
/// order, every log within its bound.
pub fn decode(json: &str) -> Result<DashboardState, CoreError> {
    let parsed: Value = serde_json::from_str(json)?;
    let Value::Object(fields) = parsed else {
        return Err(CoreError::InvalidSnapshot(
            "expected a JSON object at the top level".into(),
        ));
    };

    let mut merged = default_fields()?;
    for (key, value) in fields {
        if !value.is_null() {
            merged.insert(key, value);
        }
    }

    let mut state: DashboardState = serde_json::from_value(Value::Object(merged))?;
    if state.normalize() {
        debug!("Normalized loaded dashboard snapshot");
    }
    Ok(state)
}

fn default_fields() -> Result<Map<String, Value>, CoreError> {
    match serde_json::to_value(DashboardState::default()) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CoreError::Serialization(
            "default dashboard did not serialize to an object".into(),
        )),
        Err(e) => Err(CoreError::Serialization(format!(
            "Failed to serialize default dashboard: {e}"
        ))),
    }
}
