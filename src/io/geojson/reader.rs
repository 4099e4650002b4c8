use std::io::Read;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::algorithm::native::BoundingBox;
use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoError, Result};
use crate::feature::{Feature, FeatureId, JsonObject};
use crate::feature_collection::FeatureCollection;
use crate::geometry::{
    Geometry, GeometryData, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Read a single GeoJSON geometry object.
pub fn read_geometry<R: Read>(reader: R) -> Result<GeometryData> {
    let value = parse_json(reader)?;
    let geometry = decode_geometry(&value)?;
    tracing::debug!(kind = geometry.type_name(), "decoded GeoJSON geometry");
    Ok(geometry)
}

/// Read a GeoJSON `Feature`.
pub fn read_feature<R: Read>(reader: R) -> Result<Feature> {
    let value = parse_json(reader)?;
    decode_feature(&value)
}

/// Read a GeoJSON `FeatureCollection`.
pub fn read_feature_collection<R: Read>(reader: R) -> Result<FeatureCollection> {
    let value = parse_json(reader)?;
    let collection = decode_feature_collection(&value)?;
    tracing::debug!(
        features = collection.len(),
        "decoded GeoJSON feature collection"
    );
    Ok(collection)
}

fn parse_json<R: Read>(reader: R) -> Result<Value> {
    serde_json::from_reader(reader)
        .map_err(|err| GeoError::MalformedSyntax(format!("invalid JSON: {err}")))
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a serde_json::Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| GeoError::StructuralViolation(format!("{what} is not an object, got {value}")))
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| GeoError::StructuralViolation(format!("{what} is not an array, got {value}")))
}

/// The `"type"` member, which every GeoJSON object must carry.
fn type_member<'a>(object: &'a serde_json::Map<String, Value>, value: &Value) -> Result<&'a str> {
    match object.get("type") {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(GeoError::MalformedSyntax(format!(
            "type property not string, got {other}"
        ))),
        None => Err(GeoError::MalformedSyntax(format!(
            "type property not defined, got {value}"
        ))),
    }
}

/// Member that may be absent or `null`.
fn optional<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn optional_object(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<JsonObject>> {
    optional(object, key)
        .map(|value| {
            as_object(value, key).map(|map| {
                map.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<JsonObject>()
            })
        })
        .transpose()
}

fn decode_number(value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| GeoError::MalformedSyntax(format!("not a valid number, got {value}")))
}

/// Accepts `[minx, miny, maxx, maxy]`, `[minx, miny, minz, maxx, maxy, maxz]` or a pair of
/// corner tuples.
pub(crate) fn decode_bbox(value: &Value) -> Result<BoundingBox> {
    let items = as_array(value, "bbox")?;
    let corner = |value: &Value| -> Result<[f64; 3]> {
        let corner = as_array(value, "bbox corner")?;
        match corner.len() {
            2 => Ok([decode_number(&corner[0])?, decode_number(&corner[1])?, 0.]),
            3 => Ok([
                decode_number(&corner[0])?,
                decode_number(&corner[1])?,
                decode_number(&corner[2])?,
            ]),
            _ => Err(GeoError::StructuralViolation(format!(
                "bounding box corner must have 2 or 3 values, got {value}"
            ))),
        }
    };

    match items.len() {
        2 => Ok(BoundingBox::new(corner(&items[0])?, corner(&items[1])?)),
        4 | 6 => {
            let v = items
                .iter()
                .map(decode_number)
                .collect::<Result<Vec<_>>>()?;
            if v.len() == 4 {
                Ok(BoundingBox::new_2d([v[0], v[1]], [v[2], v[3]]))
            } else {
                Ok(BoundingBox::new([v[0], v[1], v[2]], [v[3], v[4], v[5]]))
            }
        }
        _ => Err(GeoError::StructuralViolation(format!(
            "bounding box must have 4 or 6 values, got {value}"
        ))),
    }
}

/// Collects positions into a flat buffer, fixing the dimension from the first position.
#[derive(Default)]
struct PositionBuffer {
    dim: Option<Dimension>,
    coords: Vec<f64>,
}

impl PositionBuffer {
    fn push(&mut self, value: &Value) -> Result<()> {
        let items = value.as_array().ok_or_else(|| {
            GeoError::StructuralViolation(format!("not a valid position, got {value}"))
        })?;
        let dim = Dimension::from_arity(items.len()).map_err(|_| {
            GeoError::StructuralViolation(format!("not a valid position, got {value}"))
        })?;
        match self.dim {
            None => self.dim = Some(dim),
            Some(expected) if expected != dim => {
                return Err(GeoError::StructuralViolation(format!(
                    "position {value} does not match dimension {expected}"
                )))
            }
            Some(_) => {}
        }
        for item in items {
            let n = item.as_f64().ok_or_else(|| {
                GeoError::MalformedSyntax(format!("not a valid position, got {value}"))
            })?;
            self.coords.push(n);
        }
        Ok(())
    }

    fn push_all(&mut self, value: &Value, what: &str) -> Result<()> {
        for position in as_array(value, what)? {
            self.push(position)?;
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.coords.len() / self.dim().size()
    }

    fn dim(&self) -> Dimension {
        self.dim.unwrap_or_default()
    }
}

fn decode_coordinates(kind: GeometryType, value: &Value) -> Result<Geometry> {
    let mut buffer = PositionBuffer::default();
    let geometry = match kind {
        GeometryType::Point => {
            // `[]` carries no arity.
            if as_array(value, "Point coordinates")?.is_empty() {
                return Ok(Point::empty(Dimension::XY).into());
            }
            buffer.push(value)?;
            Point::try_new(buffer.dim(), buffer.coords)?.into()
        }
        GeometryType::LineString => {
            buffer.push_all(value, "LineString coordinates")?;
            LineString::try_new(buffer.dim(), buffer.coords)?.into()
        }
        GeometryType::MultiPoint => {
            buffer.push_all(value, "MultiPoint coordinates")?;
            MultiPoint::try_new(buffer.dim(), buffer.coords)?.into()
        }
        GeometryType::Polygon | GeometryType::MultiLineString => {
            let mut offsets = vec![0];
            for ring in as_array(value, "coordinates")? {
                buffer.push_all(ring, "ring")?;
                offsets.push(buffer.len());
            }
            if kind == GeometryType::Polygon {
                Polygon::try_new(buffer.dim(), buffer.coords, offsets)?.into()
            } else {
                MultiLineString::try_new(buffer.dim(), buffer.coords, offsets)?.into()
            }
        }
        GeometryType::MultiPolygon => {
            let mut polygon_offsets = vec![0];
            let mut ring_offsets = vec![0];
            for polygon in as_array(value, "MultiPolygon coordinates")? {
                for ring in as_array(polygon, "polygon")? {
                    buffer.push_all(ring, "ring")?;
                    ring_offsets.push(buffer.len());
                }
                polygon_offsets.push(ring_offsets.len() - 1);
            }
            MultiPolygon::try_new(buffer.dim(), buffer.coords, polygon_offsets, ring_offsets)?
                .into()
        }
        GeometryType::GeometryCollection => {
            return Err(GeoError::StructuralViolation(
                "GeometryCollection has no coordinates member".to_string(),
            ))
        }
    };
    Ok(geometry)
}

fn decode_epsg(value: &Value) -> Result<i32> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|v| v.fract() == 0.).map(|v| v as i64))
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| GeoError::StructuralViolation(format!("epsg is not an integer, got {value}")))
}

/// Decode a geometry object from a parsed JSON tree.
///
/// An unrecognized `"type"` is kept without coordinates.
pub(crate) fn decode_geometry(value: &Value) -> Result<GeometryData> {
    let object = as_object(value, "geometry")?;
    let type_name = type_member(object, value)?;

    let mut geometry = match GeometryType::from_name(type_name) {
        None => GeometryData::unknown(type_name),
        Some(GeometryType::GeometryCollection) => {
            let members = object.get("geometries").ok_or_else(|| {
                GeoError::StructuralViolation(format!("geometries not defined, got {value}"))
            })?;
            let members = as_array(members, "geometries")?
                .iter()
                .map(decode_geometry)
                .collect::<Result<Vec<_>>>()?;
            GeometryData::collection(members)
        }
        Some(kind) => {
            let coordinates = object.get("coordinates").ok_or_else(|| {
                GeoError::StructuralViolation(format!("coordinates not defined, got {value}"))
            })?;
            GeometryData::from(decode_coordinates(kind, coordinates)?)
        }
    };

    if let Some(bbox) = optional(object, "bbox") {
        geometry.bbox = Some(decode_bbox(bbox)?);
    }
    if let Some(epsg) = optional(object, "epsg") {
        geometry.epsg = Some(decode_epsg(epsg)?);
    }
    Ok(geometry)
}

pub(crate) fn decode_feature(value: &Value) -> Result<Feature> {
    let object = as_object(value, "feature")?;
    let type_name = type_member(object, value)?;
    if type_name != "Feature" {
        return Err(GeoError::StructuralViolation(format!(
            "expected type Feature, got {type_name:?}"
        )));
    }

    Ok(Feature {
        id: optional(object, "id").map(FeatureId::try_from).transpose()?,
        bbox: optional(object, "bbox").map(decode_bbox).transpose()?,
        geometry: optional(object, "geometry")
            .map(decode_geometry)
            .transpose()?,
        properties: optional_object(object, "properties")?.unwrap_or_default(),
        crs: optional_object(object, "crs")?,
        ext_data: optional_object(object, "ext-data")?,
    })
}

pub(crate) fn decode_feature_collection(value: &Value) -> Result<FeatureCollection> {
    let object = as_object(value, "feature collection")?;
    let type_name = type_member(object, value)?;
    if type_name != "FeatureCollection" {
        return Err(GeoError::StructuralViolation(format!(
            "expected type FeatureCollection, got {type_name:?}"
        )));
    }
    let features = object.get("features").ok_or_else(|| {
        GeoError::StructuralViolation(format!("features not defined, got {value}"))
    })?;

    Ok(FeatureCollection {
        bbox: optional(object, "bbox").map(decode_bbox).transpose()?,
        features: as_array(features, "features")?
            .iter()
            .map(decode_feature)
            .collect::<Result<Vec<_>>>()?,
        crs: optional_object(object, "crs")?,
        properties: optional_object(object, "properties")?,
    })
}

macro_rules! impl_deserialize {
    ($type:ty, $decode:ident) => {
        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = Value::deserialize(deserializer)?;
                $decode(&value).map_err(D::Error::custom)
            }
        }
    };
}

impl_deserialize!(GeometryData, decode_geometry);
impl_deserialize!(Feature, decode_feature);
impl_deserialize!(FeatureCollection, decode_feature_collection);
