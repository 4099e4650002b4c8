use std::io::Write;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::algorithm::native::BoundingBox;
use crate::datatypes::Dimension;
use crate::error::Result;
use crate::feature::Feature;
use crate::feature_collection::FeatureCollection;
use crate::geometry::{Coord, Geometry, GeometryData, LineStringRef, PolygonRef};

/// Write a geometry object.
pub fn write_geometry<W: Write>(writer: W, geometry: &GeometryData) -> Result<()> {
    tracing::trace!(kind = geometry.type_name(), "writing GeoJSON geometry");
    serde_json::to_writer(writer, geometry)?;
    Ok(())
}

/// Write a `Feature` object.
pub fn write_feature<W: Write>(writer: W, feature: &Feature) -> Result<()> {
    serde_json::to_writer(writer, feature)?;
    Ok(())
}

/// Write a `FeatureCollection` object.
pub fn write_feature_collection<W: Write>(
    writer: W,
    collection: &FeatureCollection,
) -> Result<()> {
    tracing::trace!(
        features = collection.len(),
        "writing GeoJSON feature collection"
    );
    serde_json::to_writer(writer, collection)?;
    Ok(())
}

/// Render any of the GeoJSON object types as a string.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// A single position. M is not part of GeoJSON, so XYM positions lose it. An empty point has no
/// position at all and reads back as 2D whatever its dimension was.
struct Position<'a>(Coord<'a>);

impl Serialize for Position<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let values = self.0.as_slice();
        let len = match self.0.dim() {
            Dimension::XYM => 2,
            dim => dim.size(),
        };
        let mut seq = serializer.serialize_seq(Some(len))?;
        for value in &values[..len] {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct LinePositions<'a>(LineStringRef<'a>);

impl Serialize for LinePositions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.coords().map(Position))
    }
}

struct PolygonPositions<'a>(PolygonRef<'a>);

impl Serialize for PolygonPositions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.rings().map(LinePositions))
    }
}

/// The `"coordinates"` member of a non-collection geometry.
struct Coordinates<'a>(&'a Geometry);

impl Serialize for Coordinates<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Geometry::Point(point) => match point.coord() {
                Some(coord) => Position(coord).serialize(serializer),
                None => serializer.serialize_seq(Some(0))?.end(),
            },
            Geometry::LineString(line) => LinePositions(line.as_view()).serialize(serializer),
            Geometry::Polygon(polygon) => PolygonPositions(polygon.as_view()).serialize(serializer),
            Geometry::MultiPoint(points) => serializer.collect_seq(points.points().map(Position)),
            Geometry::MultiLineString(lines) => {
                serializer.collect_seq(lines.lines().map(LinePositions))
            }
            Geometry::MultiPolygon(polygons) => {
                serializer.collect_seq(polygons.polygons().map(PolygonPositions))
            }
            Geometry::GeometryCollection(_) => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

impl Serialize for BoundingBox {
    /// Flat `[minx, miny, maxx, maxy]`, or the six-value form when a z bound is non-zero.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_2d() {
            [self.min[0], self.min[1], self.max[0], self.max[1]].serialize(serializer)
        } else {
            [
                self.min[0],
                self.min[1],
                self.min[2],
                self.max[0],
                self.max[1],
                self.max[2],
            ]
            .serialize(serializer)
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.geometry_type().name())?;
        match self {
            Geometry::GeometryCollection(collection) => {
                map.serialize_entry("geometries", collection.geometries())?
            }
            geometry => map.serialize_entry("coordinates", &Coordinates(geometry))?,
        }
        map.end()
    }
}

impl Serialize for GeometryData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;
        if let Some(bbox) = &self.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        if let Some(coordinates) = self.coordinates() {
            map.serialize_entry("coordinates", &Coordinates(coordinates))?;
        } else if self.is_collection() {
            map.serialize_entry("geometries", self.geometries())?;
        }
        if let Some(epsg) = self.epsg {
            map.serialize_entry("epsg", &epsg)?;
        }
        map.end()
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Feature")?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        if let Some(bbox) = &self.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        map.serialize_entry("geometry", &self.geometry)?;
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &self.properties)?;
        }
        if let Some(crs) = self.crs.as_ref().filter(|crs| !crs.is_empty()) {
            map.serialize_entry("crs", crs)?;
        }
        if let Some(ext_data) = self.ext_data.as_ref().filter(|ext| !ext.is_empty()) {
            map.serialize_entry("ext-data", ext_data)?;
        }
        map.end()
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "FeatureCollection")?;
        if let Some(bbox) = &self.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        map.serialize_entry("features", &self.features)?;
        if let Some(crs) = self.crs.as_ref().filter(|crs| !crs.is_empty()) {
            map.serialize_entry("crs", crs)?;
        }
        if let Some(properties) = self.properties.as_ref().filter(|p| !p.is_empty()) {
            map.serialize_entry("properties", properties)?;
        }
        map.end()
    }
}
