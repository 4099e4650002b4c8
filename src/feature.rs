//! The GeoJSON `Feature` envelope.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::algorithm::native::eq::geometry_data_eq;
use crate::algorithm::native::{BoundingBox, ComputeBounds};
use crate::error::{GeoError, Result};
use crate::geometry::{Geometry, GeometryData};
use crate::srid::srid_from_crs;

/// A JSON object with member order preserved.
pub type JsonObject = IndexMap<String, Value>;

/// A feature identifier as it appeared on input: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FeatureId {
    Number(Number),
    String(String),
}

impl FeatureId {
    /// Coerce to an unsigned 64-bit identifier, see [`convert_feature_id`].
    pub fn as_u64(&self) -> Result<u64> {
        match self {
            FeatureId::Number(n) => convert_number(n),
            FeatureId::String(s) => convert_str(s),
        }
    }
}

impl From<u64> for FeatureId {
    fn from(value: u64) -> Self {
        FeatureId::Number(value.into())
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        FeatureId::String(value.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        FeatureId::String(value)
    }
}

impl TryFrom<&Value> for FeatureId {
    type Error = GeoError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(FeatureId::Number(n.clone())),
            Value::String(s) => Ok(FeatureId::String(s.clone())),
            other => Err(GeoError::IdentifierConversion(other.to_string())),
        }
    }
}

fn convert_number(n: &Number) -> Result<u64> {
    if let Some(v) = n.as_u64() {
        return Ok(v);
    }
    match n.as_f64() {
        // truncates toward zero, saturating at u64::MAX
        Some(v) if v.is_finite() && v >= 0. => Ok(v as u64),
        _ => Err(GeoError::IdentifierConversion(n.to_string())),
    }
}

fn convert_str(s: &str) -> Result<u64> {
    s.parse::<u64>()
        .map_err(|_| GeoError::IdentifierConversion(format!("{s:?}")))
}

/// Coerce a JSON id value to an unsigned 64-bit identifier.
///
/// Non-negative integers pass through, non-negative floats are truncated and strings are parsed
/// as decimal. Anything else is an [`GeoError::IdentifierConversion`].
pub fn convert_feature_id(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => convert_number(n),
        Value::String(s) => convert_str(s),
        other => Err(GeoError::IdentifierConversion(other.to_string())),
    }
}

/// A geometry with an id, properties and optional CRS and extension members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    pub id: Option<FeatureId>,
    pub bbox: Option<BoundingBox>,
    pub geometry: Option<GeometryData>,
    pub properties: JsonObject,
    pub crs: Option<JsonObject>,
    /// The non-standard `"ext-data"` member, kept verbatim.
    pub ext_data: Option<JsonObject>,
}

impl Feature {
    /// A feature around `geometry` with its bounding box computed.
    pub fn new(geometry: Geometry) -> Self {
        Self::from_geometry_data(geometry.into())
    }

    /// A feature around already-decoded geometry data. An existing bbox on the data is reused.
    pub fn from_geometry_data(geometry: GeometryData) -> Self {
        let bbox = geometry.bbox.or_else(|| geometry.bounding_box());
        Self {
            bbox,
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Recompute the cached bounding box from the geometry.
    pub fn update_bbox(&mut self) {
        self.bbox = self.bounding_box();
    }

    /// The id as an unsigned integer.
    pub fn id_u64(&self) -> Result<u64> {
        match &self.id {
            Some(id) => id.as_u64(),
            None => Err(GeoError::IdentifierConversion("null".to_string())),
        }
    }

    /// The SRID named by the feature's CRS member, or else the geometry's EPSG code.
    pub fn srid(&self) -> Option<i32> {
        self.crs
            .as_ref()
            .and_then(srid_from_crs)
            .or_else(|| self.geometry.as_ref().and_then(|g| g.epsg))
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn property_bool(&self, key: &str) -> Result<bool> {
        self.property(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| type_assertion(key, "bool"))
    }

    /// Integer property; floating point values are truncated.
    pub fn property_int(&self, key: &str) -> Result<i64> {
        let value = self.property(key);
        value
            .and_then(Value::as_i64)
            .or_else(|| value.and_then(Value::as_f64).map(|v| v as i64))
            .ok_or_else(|| type_assertion(key, "int"))
    }

    pub fn property_f64(&self, key: &str) -> Result<f64> {
        self.property(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| type_assertion(key, "float64"))
    }

    pub fn property_str(&self, key: &str) -> Result<&str> {
        self.property(key)
            .and_then(Value::as_str)
            .ok_or_else(|| type_assertion(key, "string"))
    }

    pub fn must_property_bool(&self, key: &str, default: bool) -> bool {
        self.property_bool(key).unwrap_or(default)
    }

    pub fn must_property_int(&self, key: &str, default: i64) -> i64 {
        self.property_int(key).unwrap_or(default)
    }

    pub fn must_property_f64(&self, key: &str, default: f64) -> f64 {
        self.property_f64(key).unwrap_or(default)
    }

    pub fn must_property_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.property_str(key).unwrap_or(default)
    }

    /// Structurally equal geometries and identical properties.
    pub fn is_equal(&self, other: &Feature) -> bool {
        let geometry_equal = match (&self.geometry, &other.geometry) {
            (Some(l), Some(r)) => geometry_data_eq(l, r),
            (None, None) => true,
            _ => false,
        };
        geometry_equal
            && self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .all(|(k, v)| other.properties.get(k) == Some(v))
    }

    /// Property keys present only on `self`, and those present only on `other`.
    pub fn property_key_diff(&self, other: &Feature) -> (Vec<String>, Vec<String>) {
        let only_in = |a: &JsonObject, b: &JsonObject| {
            a.keys()
                .filter(|k| !b.contains_key(k.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        };
        (
            only_in(&self.properties, &other.properties),
            only_in(&other.properties, &self.properties),
        )
    }
}

fn type_assertion(key: &str, expected: &'static str) -> GeoError {
    GeoError::TypeAssertion {
        key: key.to_string(),
        expected,
    }
}

impl ComputeBounds for Feature {
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.geometry.as_ref().and_then(|g| g.bounding_box())
    }
}

impl From<Geometry> for Feature {
    fn from(value: Geometry) -> Self {
        Self::new(value)
    }
}
