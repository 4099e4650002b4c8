use std::fmt::{Error, Write};

use crate::datatypes::Dimension;
use crate::geometry::{
    Coord, Geometry, GeometryCollection, LineString, LineStringRef, MultiLineString, MultiPoint,
    MultiPolygon, Point, PolygonRef,
};

/// Options for [`write_wkt_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WktWriteOptions {
    /// Render every value with this many decimals. `None` uses the shortest representation that
    /// parses back to the same `f64`.
    pub precision: Option<usize>,
}

/// Encode a geometry as WKT, prefixed with `SRID=<n>;` when an SRID is given.
///
/// ```
/// use geofeatures::geometry::Point;
/// use geofeatures::io::wkt::write_wkt;
///
/// let wkt = write_wkt(&Point::new_3d(1., 2., 3.).into(), Some(4326));
/// assert_eq!(wkt, "SRID=4326;POINTZ(1 2 3)");
/// ```
pub fn write_wkt(geometry: &Geometry, srid: Option<u32>) -> String {
    write_wkt_with_options(geometry, srid, &WktWriteOptions::default())
}

pub fn write_wkt_with_options(
    geometry: &Geometry,
    srid: Option<u32>,
    options: &WktWriteOptions,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_srid_geometry(geometry, srid, options, &mut out);
    tracing::trace!(
        kind = %geometry.geometry_type(),
        bytes = out.len(),
        "encoded WKT"
    );
    out
}

fn write_srid_geometry<W: Write>(
    geometry: &Geometry,
    srid: Option<u32>,
    options: &WktWriteOptions,
    writer: &mut W,
) -> Result<(), Error> {
    if let Some(srid) = srid {
        write!(writer, "SRID={srid};")?;
    }
    WktWriter { options, writer }.geometry(geometry)
}

fn dimension_suffix(dim: Dimension) -> &'static str {
    match dim {
        Dimension::XY => "",
        Dimension::XYZ => "Z",
        Dimension::XYM => "M",
        Dimension::XYZM => "ZM",
    }
}

struct WktWriter<'a, W: Write> {
    options: &'a WktWriteOptions,
    writer: &'a mut W,
}

impl<W: Write> WktWriter<'_, W> {
    fn geometry(&mut self, geometry: &Geometry) -> Result<(), Error> {
        self.writer.write_str(geometry.geometry_type().wkt_keyword())?;
        self.writer.write_str(dimension_suffix(geometry.dim()))?;
        if geometry.is_empty() && !matches!(geometry, Geometry::GeometryCollection(_)) {
            return self.writer.write_str(" EMPTY");
        }
        match geometry {
            Geometry::Point(point) => self.point(point),
            Geometry::LineString(line) => self.line_string(line),
            Geometry::Polygon(polygon) => self.polygon(polygon.as_view()),
            Geometry::MultiPoint(points) => self.multi_point(points),
            Geometry::MultiLineString(lines) => self.multi_line_string(lines),
            Geometry::MultiPolygon(polygons) => self.multi_polygon(polygons),
            Geometry::GeometryCollection(collection) => self.geometry_collection(collection),
        }
    }

    fn number(&mut self, value: f64) -> Result<(), Error> {
        match self.options.precision {
            Some(precision) => write!(self.writer, "{value:.precision$}"),
            None => write!(self.writer, "{value}"),
        }
    }

    fn coord(&mut self, coord: Coord<'_>) -> Result<(), Error> {
        for (i, value) in coord.as_slice().iter().enumerate() {
            if i > 0 {
                self.writer.write_char(' ')?;
            }
            self.number(*value)?;
        }
        Ok(())
    }

    /// `(x y,x y,...)`
    fn coords<'c>(&mut self, coords: impl Iterator<Item = Coord<'c>>) -> Result<(), Error> {
        self.writer.write_char('(')?;
        for (i, coord) in coords.enumerate() {
            if i > 0 {
                self.writer.write_char(',')?;
            }
            self.coord(coord)?;
        }
        self.writer.write_char(')')
    }

    fn rings(&mut self, polygon: PolygonRef<'_>) -> Result<(), Error> {
        self.writer.write_char('(')?;
        for (i, ring) in polygon.rings().enumerate() {
            if i > 0 {
                self.writer.write_char(',')?;
            }
            self.line(ring)?;
        }
        self.writer.write_char(')')
    }

    fn line(&mut self, line: LineStringRef<'_>) -> Result<(), Error> {
        self.coords(line.coords())
    }

    fn point(&mut self, point: &Point) -> Result<(), Error> {
        self.coords(point.coord().into_iter())
    }

    fn line_string(&mut self, line: &LineString) -> Result<(), Error> {
        self.line(line.as_view())
    }

    fn polygon(&mut self, polygon: PolygonRef<'_>) -> Result<(), Error> {
        self.rings(polygon)
    }

    fn multi_point(&mut self, points: &MultiPoint) -> Result<(), Error> {
        self.coords(points.points())
    }

    fn multi_line_string(&mut self, lines: &MultiLineString) -> Result<(), Error> {
        self.writer.write_char('(')?;
        for (i, line) in lines.lines().enumerate() {
            if i > 0 {
                self.writer.write_char(',')?;
            }
            self.line(line)?;
        }
        self.writer.write_char(')')
    }

    fn multi_polygon(&mut self, polygons: &MultiPolygon) -> Result<(), Error> {
        self.writer.write_char('(')?;
        for (i, polygon) in polygons.polygons().enumerate() {
            if i > 0 {
                self.writer.write_char(',')?;
            }
            self.rings(polygon)?;
        }
        self.writer.write_char(')')
    }

    fn geometry_collection(&mut self, collection: &GeometryCollection) -> Result<(), Error> {
        if collection.num_geometries() == 0 {
            return self.writer.write_str(" EMPTY");
        }
        self.writer.write_char('(')?;
        for (i, member) in collection.iter().enumerate() {
            if i > 0 {
                self.writer.write_char(',')?;
            }
            self.geometry(member)?;
        }
        self.writer.write_char(')')
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::native::geometry_eq;
    use crate::geometry::Polygon;
    use crate::io::wkt::read_wkt;
    use crate::test::{
        geometrycollection::gc0, linestring::ls0, multilinestring::ml0, multipoint::mp0,
        multipolygon::{mpoly0, mpoly_z}, point::p_z, polygon::poly1,
    };

    #[test]
    fn canonical_text() {
        assert_eq!(write_wkt(&p_z().into(), None), "POINTZ(1 2 3)");
        assert_eq!(write_wkt(&ls0().into(), None), "LINESTRING(0 1,1 2)");
        assert_eq!(
            write_wkt(&poly1().into(), None),
            "POLYGON((0 0,4 0,4 4,0 4,0 0),(1 1,2 1,2 2,1 2,1 1))"
        );
        assert_eq!(write_wkt(&mp0().into(), None), "MULTIPOINT(0 1,1 2)");
        assert_eq!(
            write_wkt(&ml0().into(), None),
            "MULTILINESTRING((0 1,1 2),(3 4,5 6))"
        );
        assert_eq!(
            write_wkt(&gc0().into(), Some(27700)),
            "SRID=27700;GEOMETRYCOLLECTION(POINT(4 6),LINESTRING(4 6,7 10))"
        );
    }

    #[test]
    fn multipolygon_z_is_textually_stable() {
        let input = "SRID=4312;MULTIPOLYGONZ(((0 0 0,4 0 0,4 4 0,0 4 0,0 0 0),(1 1 0,2 1 0,2 2 0,1 2 0,1 1 0)),((-1 -1 0,-1 -2 0,-2 -2 0,-2 -1 0,-1 -1 0)))";
        let (geometry, srid) = read_wkt(input.as_bytes()).unwrap();
        assert_eq!(write_wkt(&geometry, srid), input);
        assert_eq!(geometry, mpoly_z().into());
    }

    #[test]
    fn round_trip() {
        let geometries: Vec<Geometry> = vec![
            p_z().into(),
            ls0().into(),
            poly1().into(),
            mp0().into(),
            ml0().into(),
            mpoly0().into(),
            mpoly_z().into(),
            gc0().into(),
        ];
        for geometry in &geometries {
            for srid in [None, Some(4326)] {
                let text = write_wkt(geometry, srid);
                let (decoded, decoded_srid) = read_wkt(text.as_bytes()).unwrap();
                assert_eq!(decoded_srid, srid);
                assert!(geometry_eq(geometry, &decoded), "{text}");
            }
        }
    }

    #[test]
    fn measured_and_empty() {
        let point: Geometry = Point::try_new(Dimension::XYM, vec![1., 2., 5.]).unwrap().into();
        assert_eq!(write_wkt(&point, None), "POINTM(1 2 5)");
        assert_eq!(read_wkt(b"POINTM(1 2 5)").unwrap().0, point);

        let point: Geometry = Point::try_new(Dimension::XYZM, vec![1., 2., 3., 4.])
            .unwrap()
            .into();
        assert_eq!(write_wkt(&point, None), "POINTZM(1 2 3 4)");

        assert_eq!(
            write_wkt(&Point::empty(Dimension::XY).into(), None),
            "POINT EMPTY"
        );
        assert_eq!(
            write_wkt(&Polygon::empty(Dimension::XYZ).into(), None),
            "POLYGONZ EMPTY"
        );
        assert_eq!(
            write_wkt(&GeometryCollection::new(vec![]).into(), None),
            "GEOMETRYCOLLECTION EMPTY"
        );
        for text in ["POINT EMPTY", "POLYGONZ EMPTY", "GEOMETRYCOLLECTION EMPTY"] {
            let (geometry, _) = read_wkt(text.as_bytes()).unwrap();
            assert_eq!(write_wkt(&geometry, None), text);
        }
    }

    #[test]
    fn shortest_and_fixed_precision() {
        let line: Geometry = LineString::from(vec![[0.1, -122.4425587930444], [1e21, 2.5]]).into();
        assert_eq!(
            write_wkt(&line, None),
            "LINESTRING(0.1 -122.4425587930444,1000000000000000000000 2.5)"
        );
        let (decoded, _) = read_wkt(write_wkt(&line, None).as_bytes()).unwrap();
        assert_eq!(decoded, line);

        let options = WktWriteOptions { precision: Some(2) };
        assert_eq!(
            write_wkt_with_options(&ls0().into(), None, &options),
            "LINESTRING(0.00 1.00,1.00 2.00)"
        );
    }
}
