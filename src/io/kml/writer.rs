use std::fmt::{Error, Write};

use crate::geometry::{Coord, Geometry, LineStringRef, PolygonRef};

/// Encode a geometry as a KML geometry element.
///
/// Multi-geometries and collections become `MultiGeometry`. M values are dropped.
///
/// ```
/// use geofeatures::geometry::LineString;
/// use geofeatures::io::kml::write_kml;
///
/// let line = LineString::from(vec![[0., 0.], [1., 1.]]);
/// assert_eq!(
///     write_kml(&line.into()),
///     "<LineString><coordinates>0,0 1,1</coordinates></LineString>"
/// );
/// ```
pub fn write_kml(geometry: &Geometry) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = KmlWriter { writer: &mut out }.geometry(geometry);
    tracing::trace!(
        kind = %geometry.geometry_type(),
        bytes = out.len(),
        "encoded KML"
    );
    out
}

struct KmlWriter<'a, W: Write> {
    writer: &'a mut W,
}

impl<W: Write> KmlWriter<'_, W> {
    /// `x,y` or `x,y,z`
    fn coord(&mut self, coord: Coord<'_>) -> Result<(), Error> {
        write!(self.writer, "{},{}", coord.x(), coord.y())?;
        if let Some(z) = coord.z() {
            write!(self.writer, ",{z}")?;
        }
        Ok(())
    }

    fn coordinates<'c>(&mut self, coords: impl Iterator<Item = Coord<'c>>) -> Result<(), Error> {
        self.writer.write_str("<coordinates>")?;
        for (i, coord) in coords.enumerate() {
            if i > 0 {
                self.writer.write_char(' ')?;
            }
            self.coord(coord)?;
        }
        self.writer.write_str("</coordinates>")
    }

    fn point(&mut self, coord: Option<Coord<'_>>) -> Result<(), Error> {
        self.writer.write_str("<Point>")?;
        self.coordinates(coord.into_iter())?;
        self.writer.write_str("</Point>")
    }

    fn line_string(&mut self, line: LineStringRef<'_>) -> Result<(), Error> {
        self.writer.write_str("<LineString>")?;
        self.coordinates(line.coords())?;
        self.writer.write_str("</LineString>")
    }

    fn polygon(&mut self, polygon: PolygonRef<'_>) -> Result<(), Error> {
        self.writer.write_str("<Polygon>")?;
        for (i, ring) in polygon.rings().enumerate() {
            let boundary = if i == 0 {
                "outerBoundaryIs"
            } else {
                "innerBoundaryIs"
            };
            write!(self.writer, "<{boundary}><LinearRing>")?;
            self.coordinates(ring.coords())?;
            write!(self.writer, "</LinearRing></{boundary}>")?;
        }
        self.writer.write_str("</Polygon>")
    }

    fn geometry(&mut self, geometry: &Geometry) -> Result<(), Error> {
        match geometry {
            Geometry::Point(point) => self.point(point.coord()),
            Geometry::LineString(line) => self.line_string(line.as_view()),
            Geometry::Polygon(polygon) => self.polygon(polygon.as_view()),
            Geometry::MultiPoint(points) => {
                self.writer.write_str("<MultiGeometry>")?;
                for point in points.points() {
                    self.point(Some(point))?;
                }
                self.writer.write_str("</MultiGeometry>")
            }
            Geometry::MultiLineString(lines) => {
                self.writer.write_str("<MultiGeometry>")?;
                for line in lines.lines() {
                    self.line_string(line)?;
                }
                self.writer.write_str("</MultiGeometry>")
            }
            Geometry::MultiPolygon(polygons) => {
                self.writer.write_str("<MultiGeometry>")?;
                for polygon in polygons.polygons() {
                    self.polygon(polygon)?;
                }
                self.writer.write_str("</MultiGeometry>")
            }
            Geometry::GeometryCollection(collection) => {
                self.writer.write_str("<MultiGeometry>")?;
                for member in collection.iter() {
                    self.geometry(member)?;
                }
                self.writer.write_str("</MultiGeometry>")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::datatypes::Dimension;
    use crate::geometry::{
        GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    };

    #[test]
    fn points() {
        assert_eq!(
            write_kml(&Point::new(0., 0.).into()),
            "<Point><coordinates>0,0</coordinates></Point>"
        );
        assert_eq!(
            write_kml(&Point::new_3d(0., 0., 1.).into()),
            "<Point><coordinates>0,0,1</coordinates></Point>"
        );
        let measured = Point::try_new(Dimension::XYM, vec![1., 2., 9.]).unwrap();
        assert_eq!(
            write_kml(&measured.into()),
            "<Point><coordinates>1,2</coordinates></Point>"
        );
    }

    #[test]
    fn multi_point() {
        let points = MultiPoint::from(vec![[1., 2., 1.], [3., 4., 1.], [5., 6., 1.]]);
        assert_eq!(
            write_kml(&points.into()),
            "<MultiGeometry><Point><coordinates>1,2,1</coordinates></Point><Point><coordinates>3,4,1</coordinates></Point><Point><coordinates>5,6,1</coordinates></Point></MultiGeometry>"
        );
    }

    #[test]
    fn line_strings() {
        let line = LineString::from(vec![[0., 0.], [1., 1.]]);
        assert_eq!(
            write_kml(&line.into()),
            "<LineString><coordinates>0,0 1,1</coordinates></LineString>"
        );
        let line = LineString::from(vec![[0., 0., 1.], [1., 1., 1.]]);
        assert_eq!(
            write_kml(&line.into()),
            "<LineString><coordinates>0,0,1 1,1,1</coordinates></LineString>"
        );
        let lines = MultiLineString::from(vec![vec![[1., 2.], [3., 4.], [5., 6.], [7., 8.]]]);
        assert_eq!(
            write_kml(&lines.into()),
            "<MultiGeometry><LineString><coordinates>1,2 3,4 5,6 7,8</coordinates></LineString></MultiGeometry>"
        );
    }

    #[test]
    fn polygons() {
        let polygon = Polygon::from(vec![vec![[1., 2.], [3., 4.], [5., 6.], [1., 2.]]]);
        assert_eq!(
            write_kml(&polygon.into()),
            "<Polygon><outerBoundaryIs><LinearRing><coordinates>1,2 3,4 5,6 1,2</coordinates></LinearRing></outerBoundaryIs></Polygon>"
        );

        let polygons = MultiPolygon::from(vec![vec![
            vec![[1., 2.], [4., 5.], [7., 8.], [1., 2.]],
            vec![[0.4, 0.5], [0.7, 0.8], [0.1, 0.2], [0.4, 0.5]],
        ]]);
        assert_eq!(
            write_kml(&polygons.into()),
            "<MultiGeometry><Polygon><outerBoundaryIs><LinearRing><coordinates>1,2 4,5 7,8 1,2</coordinates></LinearRing></outerBoundaryIs><innerBoundaryIs><LinearRing><coordinates>0.4,0.5 0.7,0.8 0.1,0.2 0.4,0.5</coordinates></LinearRing></innerBoundaryIs></Polygon></MultiGeometry>"
        );
    }

    #[test]
    fn collection() {
        let collection = GeometryCollection::new(vec![
            LineString::from(vec![
                [-122.4425587930444, 37.80666418607323],
                [-122.4428379594768, 37.80663578323093],
            ])
            .into(),
            LineString::from(vec![
                [-122.4425509770566, 37.80662588061205],
                [-122.4428340530617, 37.8065999493009],
            ])
            .into(),
        ]);
        assert_eq!(
            write_kml(&collection.into()),
            "<MultiGeometry><LineString><coordinates>-122.4425587930444,37.80666418607323 -122.4428379594768,37.80663578323093</coordinates></LineString><LineString><coordinates>-122.4425509770566,37.80662588061205 -122.4428340530617,37.8065999493009</coordinates></LineString></MultiGeometry>"
        );
    }
}
