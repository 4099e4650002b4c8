//! Conversions to and from [`geo`] geometries.
//!
//! `geo` types are two-dimensional, so z and m values are dropped on the way out.

use crate::error::{GeoError, Result};
use crate::geometry::{
    Coord, Geometry, GeometryCollection, LineString, LineStringRef, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, PolygonRef,
};

fn coord_to_geo(coord: Coord<'_>) -> geo::Coord<f64> {
    geo::Coord {
        x: coord.x(),
        y: coord.y(),
    }
}

fn line_string_to_geo(line: LineStringRef<'_>) -> geo::LineString<f64> {
    geo::LineString::new(line.coords().map(coord_to_geo).collect())
}

fn polygon_to_geo(polygon: PolygonRef<'_>) -> geo::Polygon<f64> {
    let mut rings = polygon.rings().map(line_string_to_geo);
    let exterior = rings.next().unwrap_or_else(|| geo::LineString::new(vec![]));
    geo::Polygon::new(exterior, rings.collect())
}

impl TryFrom<&Geometry> for geo::Geometry<f64> {
    type Error = GeoError;

    fn try_from(value: &Geometry) -> Result<Self> {
        let geometry = match value {
            Geometry::Point(point) => {
                let coord = point.coord().ok_or_else(|| {
                    GeoError::UnsupportedVariant("empty point has no geo equivalent".to_string())
                })?;
                geo::Geometry::Point(geo::Point(coord_to_geo(coord)))
            }
            Geometry::LineString(line) => {
                geo::Geometry::LineString(line_string_to_geo(line.as_view()))
            }
            Geometry::Polygon(polygon) => geo::Geometry::Polygon(polygon_to_geo(polygon.as_view())),
            Geometry::MultiPoint(points) => geo::Geometry::MultiPoint(geo::MultiPoint::new(
                points
                    .points()
                    .map(|coord| geo::Point(coord_to_geo(coord)))
                    .collect(),
            )),
            Geometry::MultiLineString(lines) => geo::Geometry::MultiLineString(
                geo::MultiLineString::new(lines.lines().map(line_string_to_geo).collect()),
            ),
            Geometry::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(
                geo::MultiPolygon::new(polygons.polygons().map(polygon_to_geo).collect()),
            ),
            Geometry::GeometryCollection(collection) => {
                geo::Geometry::GeometryCollection(geo::GeometryCollection(
                    collection
                        .iter()
                        .map(geo::Geometry::try_from)
                        .collect::<Result<Vec<_>>>()?,
                ))
            }
        };
        Ok(geometry)
    }
}

fn geo_line_coords(line: &geo::LineString<f64>) -> Vec<[f64; 2]> {
    line.coords().map(|c| [c.x, c.y]).collect()
}

fn geo_polygon_rings(polygon: &geo::Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .filter(|ring| !ring.0.is_empty())
        .map(geo_line_coords)
        .collect()
}

impl From<&geo::Geometry<f64>> for Geometry {
    fn from(value: &geo::Geometry<f64>) -> Self {
        match value {
            geo::Geometry::Point(point) => Point::new(point.x(), point.y()).into(),
            geo::Geometry::Line(line) => LineString::from(vec![
                [line.start.x, line.start.y],
                [line.end.x, line.end.y],
            ])
            .into(),
            geo::Geometry::LineString(line) => LineString::from(geo_line_coords(line)).into(),
            geo::Geometry::Polygon(polygon) => Polygon::from(geo_polygon_rings(polygon)).into(),
            geo::Geometry::MultiPoint(points) => {
                MultiPoint::from(points.iter().map(|p| [p.x(), p.y()]).collect::<Vec<_>>()).into()
            }
            geo::Geometry::MultiLineString(lines) => {
                MultiLineString::from(lines.iter().map(geo_line_coords).collect::<Vec<_>>()).into()
            }
            geo::Geometry::MultiPolygon(polygons) => MultiPolygon::from(
                polygons.iter().map(geo_polygon_rings).collect::<Vec<_>>(),
            )
            .into(),
            geo::Geometry::GeometryCollection(collection) => {
                GeometryCollection::new(collection.iter().map(Geometry::from).collect()).into()
            }
            geo::Geometry::Rect(rect) => Polygon::from(geo_polygon_rings(&rect.to_polygon())).into(),
            geo::Geometry::Triangle(triangle) => {
                Polygon::from(geo_polygon_rings(&triangle.to_polygon())).into()
            }
        }
    }
}

impl From<geo::Geometry<f64>> for Geometry {
    fn from(value: geo::Geometry<f64>) -> Self {
        Geometry::from(&value)
    }
}

#[cfg(test)]
mod test {
    use geo::{coord, line_string, point, polygon, Rect};

    use super::*;
    use crate::datatypes::Dimension;
    use crate::test::{
        geometrycollection::gc0, multilinestring::ml0, multipolygon::mpoly0, point::p_z,
        polygon::poly1,
    };

    #[test]
    fn round_trip_through_geo() {
        let geometries: Vec<Geometry> =
            vec![poly1().into(), ml0().into(), mpoly0().into(), gc0().into()];
        for geometry in &geometries {
            let geo_geometry = geo::Geometry::try_from(geometry).unwrap();
            assert_eq!(&Geometry::from(&geo_geometry), geometry);
        }
    }

    #[test]
    fn drops_z() {
        let geo_geometry = geo::Geometry::try_from(&Geometry::from(p_z())).unwrap();
        assert_eq!(geo_geometry, geo::Geometry::Point(point!(x: 1., y: 2.)));
    }

    #[test]
    fn empty_point_is_rejected() {
        let empty: Geometry = Point::empty(Dimension::XY).into();
        assert!(matches!(
            geo::Geometry::try_from(&empty),
            Err(GeoError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn geo_only_shapes() {
        let rect = Rect::new(coord! { x: 0., y: 0. }, coord! { x: 1., y: 2. });
        let geometry = Geometry::from(geo::Geometry::Rect(rect));
        let Geometry::Polygon(polygon) = &geometry else {
            panic!("expected polygon, got {geometry:?}");
        };
        assert_eq!(polygon.num_rings(), 1);
        assert_eq!(polygon.exterior().unwrap().num_coords(), 5);

        let line = geo::Line::new(coord! { x: 0., y: 0. }, coord! { x: 3., y: 4. });
        assert_eq!(
            Geometry::from(geo::Geometry::Line(line)),
            LineString::from(vec![[0., 0.], [3., 4.]]).into()
        );

        let polygon = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 0., y: 1.)];
        let triangle = geo::Triangle::new(
            coord! { x: 0., y: 0. },
            coord! { x: 1., y: 0. },
            coord! { x: 0., y: 1. },
        );
        assert_eq!(
            Geometry::from(geo::Geometry::Triangle(triangle)),
            Geometry::from(geo::Geometry::Polygon(polygon))
        );

        let ls = line_string![(x: 1., y: 1.), (x: 2., y: 2.)];
        assert_eq!(
            Geometry::from(geo::Geometry::LineString(ls)),
            LineString::from(vec![[1., 1.], [2., 2.]]).into()
        );
    }
}
