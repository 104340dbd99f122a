//! Everything a compiled expression reads at evaluation time: the feature
//! being styled and the map-level properties (currently just `zoom`).

use crate::value::Value;
use serde_json::Map;

/// A single feature: its properties bag, geometry type, and id, exactly
/// the three things `properties`/`geometry_type`/`id` expose (spec.md §6.4).
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub properties: Map<String, serde_json::Value>,
    pub geometry_type: String,
    pub id: Value,
}

impl Feature {
    pub fn new(
        properties: Map<String, serde_json::Value>,
        geometry_type: impl Into<String>,
        id: Value,
    ) -> Self {
        Self {
            properties,
            geometry_type: geometry_type.into(),
            id,
        }
    }

    pub fn get_property(&self, key: &str) -> Option<Value> {
        self.properties.get(key).map(Value::from_json)
    }
}

/// Map-level state, independent of any one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProperties {
    pub zoom: f64,
}

/// The context threaded through every compiled [`crate::compile::Thunk`].
pub struct EvalContext<'a> {
    pub map_properties: &'a MapProperties,
    pub feature: &'a Feature,
}

impl<'a> EvalContext<'a> {
    pub fn new(map_properties: &'a MapProperties, feature: &'a Feature) -> Self {
        Self {
            map_properties,
            feature,
        }
    }
}
