use crate::geometry::{Geometry, GeometryCollection, LineString, Point};

/// `GEOMETRYCOLLECTION(POINT(4 6),LINESTRING(4 6,7 10))`
pub(crate) fn gc0() -> GeometryCollection {
    let line: LineString = vec![[4., 6.], [7., 10.]].into();
    GeometryCollection::new(vec![
        Geometry::Point(Point::new(4., 6.)),
        Geometry::LineString(line),
    ])
}
