//! The in-memory geometry model every codec decodes into and encodes from.
//!
//! Each owned geometry stores its positions in a single flat `Vec<f64>` with a stride of
//! [`Dimension::size`], plus offset tables for ring and part boundaries. Nested shapes only
//! exist at codec boundaries.

pub use collection::GeometryCollection;
pub use coord::Coord;
pub use data::GeometryData;
pub use linestring::{LineString, LineStringRef};
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use point::Point;
pub use polygon::{Polygon, PolygonRef};

mod collection;
pub(crate) mod coord;
mod data;
mod linestring;
mod multilinestring;
mod multipoint;
mod multipolygon;
mod point;
mod polygon;

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoError, Result};

/// A geometry value of any of the seven Simple Features kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    pub fn dim(&self) -> Dimension {
        match self {
            Geometry::Point(g) => g.dim(),
            Geometry::LineString(g) => g.dim(),
            Geometry::Polygon(g) => g.dim(),
            Geometry::MultiPoint(g) => g.dim(),
            Geometry::MultiLineString(g) => g.dim(),
            Geometry::MultiPolygon(g) => g.dim(),
            Geometry::GeometryCollection(g) => g.dim(),
        }
    }

    /// Whether coordinates carry a z value.
    pub fn is_3d(&self) -> bool {
        self.dim().has_z()
    }

    /// True when the geometry references no coordinates at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

pub(crate) fn check_stride(coords: &[f64], dim: Dimension) -> Result<()> {
    if coords.len() % dim.size() != 0 {
        return Err(GeoError::StructuralViolation(format!(
            "{} values do not form whole {dim} coordinates",
            coords.len()
        )));
    }
    Ok(())
}

/// Validate an offset table: starts at 0, never decreases and ends at `len`.
pub(crate) fn check_offsets(offsets: &[usize], len: usize, what: &str) -> Result<()> {
    match (offsets.first(), offsets.last()) {
        (Some(0), Some(last)) if *last == len => {}
        _ => {
            return Err(GeoError::StructuralViolation(format!(
                "{what} offsets {offsets:?} do not span {len} items"
            )))
        }
    }
    if offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err(GeoError::StructuralViolation(format!(
            "{what} offsets {offsets:?} are not monotonic"
        )));
    }
    Ok(())
}

pub(crate) fn flatten_coords<C: AsRef<[f64]>>(dim: Dimension, coords: &[C]) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(coords.len() * dim.size());
    for coord in coords {
        let coord = coord.as_ref();
        if coord.len() != dim.size() {
            return Err(GeoError::StructuralViolation(format!(
                "coordinate {coord:?} does not match dimension {dim}"
            )));
        }
        out.extend_from_slice(coord);
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{geometrycollection, linestring, point, polygon};

    #[test]
    fn kind_and_dimension() {
        let geom: Geometry = point::p0().into();
        assert_eq!(geom.geometry_type(), GeometryType::Point);
        assert!(!geom.is_3d());

        let geom: Geometry = linestring::ls_z().into();
        assert_eq!(geom.geometry_type(), GeometryType::LineString);
        assert!(geom.is_3d());

        let geom: Geometry = polygon::poly1().into();
        assert_eq!(geom.dim(), Dimension::XY);

        let geom: Geometry = geometrycollection::gc0().into();
        assert_eq!(geom.geometry_type(), GeometryType::GeometryCollection);
        assert!(!geom.is_empty());
    }

    #[test]
    fn empty_geometries() {
        assert!(Geometry::from(Point::empty(Dimension::XY)).is_empty());
        assert!(Geometry::from(MultiPolygon::empty(Dimension::XYZ)).is_empty());
        assert!(Geometry::from(GeometryCollection::new(vec![])).is_empty());
    }

    #[test]
    fn offsets() {
        assert!(check_offsets(&[0, 2, 4], 4, "ring").is_ok());
        assert!(check_offsets(&[0, 3, 2, 4], 4, "ring").is_err());
        assert!(check_offsets(&[1, 4], 4, "ring").is_err());
        assert!(check_offsets(&[0], 0, "ring").is_ok());
    }
}
