//! Geometry kinds and coordinate dimensions shared by every codec.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{GeoError, Result};

/// The dimension of a geometry's coordinates.
///
/// The dimension is a property of the geometry, not of each coordinate: every coordinate tuple
/// of a geometry has exactly [`Dimension::size`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional.
    XYZ,

    /// XYM (2D with measure).
    XYM,

    /// XYZM (3D with measure).
    XYZM,
}

impl Dimension {
    /// Returns the number of values in each coordinate tuple.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
            Dimension::XYM => 3,
            Dimension::XYZM => 4,
        }
    }

    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ | Dimension::XYZM)
    }

    pub fn has_m(&self) -> bool {
        matches!(self, Dimension::XYM | Dimension::XYZM)
    }

    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::XY,
            (true, false) => Dimension::XYZ,
            (false, true) => Dimension::XYM,
            (true, true) => Dimension::XYZM,
        }
    }

    /// Infer a dimension from a bare tuple length. A 3-tuple is read as XYZ.
    pub fn from_arity(arity: usize) -> Result<Self> {
        match arity {
            2 => Ok(Dimension::XY),
            3 => Ok(Dimension::XYZ),
            4 => Ok(Dimension::XYZM),
            _ => Err(GeoError::StructuralViolation(format!(
                "coordinate tuple must have 2, 3 or 4 values, got {arity}"
            ))),
        }
    }

    /// Index of the z value inside a coordinate tuple, if any.
    pub(crate) fn z_index(&self) -> Option<usize> {
        self.has_z().then_some(2)
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::XY => write!(f, "XY"),
            Dimension::XYZ => write!(f, "XYZ"),
            Dimension::XYM => write!(f, "XYM"),
            Dimension::XYZM => write!(f, "XYZM"),
        }
    }
}

/// The seven Simple Features geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// The GeoJSON `"type"` name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Look up a kind by its exact GeoJSON name.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Point" => GeometryType::Point,
            "LineString" => GeometryType::LineString,
            "Polygon" => GeometryType::Polygon,
            "MultiPoint" => GeometryType::MultiPoint,
            "MultiLineString" => GeometryType::MultiLineString,
            "MultiPolygon" => GeometryType::MultiPolygon,
            "GeometryCollection" => GeometryType::GeometryCollection,
            _ => return None,
        };
        Some(kind)
    }

    /// The upper-case WKT keyword of this kind, without dimension suffix.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    pub(crate) fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "POINT" => GeometryType::Point,
            "LINESTRING" => GeometryType::LineString,
            "POLYGON" => GeometryType::Polygon,
            "MULTIPOINT" => GeometryType::MultiPoint,
            "MULTILINESTRING" => GeometryType::MultiLineString,
            "MULTIPOLYGON" => GeometryType::MultiPolygon,
            "GEOMETRYCOLLECTION" => GeometryType::GeometryCollection,
            _ => return None,
        };
        Some(kind)
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryType {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| GeoError::UnsupportedVariant(format!("unknown geometry type {s:?}")))
    }
}
