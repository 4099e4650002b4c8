use std::fmt::{Error, Write};

use crate::geometry::{Coord, Geometry, LineStringRef, PolygonRef};

pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// Attributes placed on the outermost GML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GmlWriteOptions {
    /// `srsName`, e.g. `urn:ogc:def:crs:EPSG::3857`.
    pub srs_name: Option<String>,
    /// `gml:id`
    pub gml_id: Option<String>,
    /// Declare `xmlns:gml`.
    pub namespace: bool,
}

/// Encode a geometry as a GML 3.2 element with no attributes beyond `srsDimension`.
///
/// ```
/// use geofeatures::geometry::Point;
/// use geofeatures::io::gml::write_gml;
///
/// assert_eq!(
///     write_gml(&Point::new(1., 2.).into()),
///     "<gml:Point><gml:coordinates>1 2</gml:coordinates></gml:Point>"
/// );
/// ```
pub fn write_gml(geometry: &Geometry) -> String {
    write_gml_with_options(geometry, &GmlWriteOptions::default())
}

/// Encode a geometry as GML 3.2.
///
/// Coordinates are written as a flat space-separated list inside `gml:coordinates`. M values are
/// dropped, and 3D geometries get `srsDimension="3"` on the outermost element.
pub fn write_gml_with_options(geometry: &Geometry, options: &GmlWriteOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = GmlWriter {
        writer: &mut out,
        root: Some(RootAttributes {
            options,
            is_3d: any_3d(geometry),
        }),
    }
    .geometry(geometry);
    tracing::trace!(
        kind = %geometry.geometry_type(),
        bytes = out.len(),
        "encoded GML"
    );
    out
}

/// Whether the geometry or any collection member carries z values.
fn any_3d(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::GeometryCollection(collection) => {
            geometry.is_3d() || collection.iter().any(any_3d)
        }
        _ => geometry.is_3d(),
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

struct RootAttributes<'a> {
    options: &'a GmlWriteOptions,
    is_3d: bool,
}

struct GmlWriter<'a, W: Write> {
    writer: &'a mut W,
    /// Taken by the first element written.
    root: Option<RootAttributes<'a>>,
}

impl<W: Write> GmlWriter<'_, W> {
    fn open(&mut self, name: &str) -> Result<(), Error> {
        write!(self.writer, "<gml:{name}")?;
        if let Some(root) = self.root.take() {
            if let Some(id) = &root.options.gml_id {
                write!(self.writer, " gml:id=\"{}\"", escape_attribute(id))?;
            }
            if root.options.namespace {
                write!(self.writer, " xmlns:gml=\"{GML_NAMESPACE}\"")?;
            }
            if let Some(srs_name) = &root.options.srs_name {
                write!(self.writer, " srsName=\"{}\"", escape_attribute(srs_name))?;
            }
            if root.is_3d {
                self.writer.write_str(" srsDimension=\"3\"")?;
            }
        }
        self.writer.write_char('>')
    }

    fn close(&mut self, name: &str) -> Result<(), Error> {
        write!(self.writer, "</gml:{name}>")
    }

    fn coordinates<'c>(&mut self, coords: impl Iterator<Item = Coord<'c>>) -> Result<(), Error> {
        self.writer.write_str("<gml:coordinates>")?;
        for (i, coord) in coords.enumerate() {
            if i > 0 {
                self.writer.write_char(' ')?;
            }
            write!(self.writer, "{} {}", coord.x(), coord.y())?;
            if let Some(z) = coord.z() {
                write!(self.writer, " {z}")?;
            }
        }
        self.writer.write_str("</gml:coordinates>")
    }

    fn point(&mut self, coord: Option<Coord<'_>>) -> Result<(), Error> {
        self.open("Point")?;
        self.coordinates(coord.into_iter())?;
        self.close("Point")
    }

    fn line_string(&mut self, line: LineStringRef<'_>) -> Result<(), Error> {
        self.open("LineString")?;
        self.coordinates(line.coords())?;
        self.close("LineString")
    }

    fn polygon(&mut self, polygon: PolygonRef<'_>) -> Result<(), Error> {
        self.open("Polygon")?;
        for (i, ring) in polygon.rings().enumerate() {
            let boundary = if i == 0 { "exterior" } else { "interior" };
            write!(self.writer, "<gml:{boundary}><gml:LinearRing>")?;
            self.coordinates(ring.coords())?;
            write!(self.writer, "</gml:LinearRing></gml:{boundary}>")?;
        }
        self.close("Polygon")
    }

    fn geometry(&mut self, geometry: &Geometry) -> Result<(), Error> {
        match geometry {
            Geometry::Point(point) => self.point(point.coord()),
            Geometry::LineString(line) => self.line_string(line.as_view()),
            Geometry::Polygon(polygon) => self.polygon(polygon.as_view()),
            Geometry::MultiPoint(points) => {
                self.open("MultiPoint")?;
                for point in points.points() {
                    self.writer.write_str("<gml:pointMember>")?;
                    self.point(Some(point))?;
                    self.writer.write_str("</gml:pointMember>")?;
                }
                self.close("MultiPoint")
            }
            Geometry::MultiLineString(lines) => {
                self.open("MultiCurve")?;
                for line in lines.lines() {
                    self.writer.write_str("<gml:curveMember>")?;
                    self.line_string(line)?;
                    self.writer.write_str("</gml:curveMember>")?;
                }
                self.close("MultiCurve")
            }
            Geometry::MultiPolygon(polygons) => {
                self.open("MultiSurface")?;
                for polygon in polygons.polygons() {
                    self.writer.write_str("<gml:surfaceMember>")?;
                    self.polygon(polygon)?;
                    self.writer.write_str("</gml:surfaceMember>")?;
                }
                self.close("MultiSurface")
            }
            Geometry::GeometryCollection(collection) => {
                self.open("MultiGeometry")?;
                for member in collection.iter() {
                    self.writer.write_str("<gml:geometryMember>")?;
                    self.geometry(member)?;
                    self.writer.write_str("</gml:geometryMember>")?;
                }
                self.close("MultiGeometry")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::datatypes::Dimension;
    use crate::geometry::{GeometryCollection, LineString, Point};
    use crate::srid::srid_to_urn;
    use crate::test::{
        geometrycollection::gc0, multilinestring::ml0, multipoint::mp0, multipolygon::mpoly0,
        polygon::{poly1, poly_z},
    };

    #[test]
    fn simple_kinds() {
        assert_eq!(
            write_gml(&LineString::from(vec![[0., 0.], [1., 1.5]]).into()),
            "<gml:LineString><gml:coordinates>0 0 1 1.5</gml:coordinates></gml:LineString>"
        );
        assert_eq!(
            write_gml(&poly1().into()),
            "<gml:Polygon><gml:exterior><gml:LinearRing><gml:coordinates>0 0 4 0 4 4 0 4 0 0</gml:coordinates></gml:LinearRing></gml:exterior><gml:interior><gml:LinearRing><gml:coordinates>1 1 2 1 2 2 1 2 1 1</gml:coordinates></gml:LinearRing></gml:interior></gml:Polygon>"
        );
    }

    #[test]
    fn multi_kinds() {
        assert_eq!(
            write_gml(&mp0().into()),
            "<gml:MultiPoint><gml:pointMember><gml:Point><gml:coordinates>0 1</gml:coordinates></gml:Point></gml:pointMember><gml:pointMember><gml:Point><gml:coordinates>1 2</gml:coordinates></gml:Point></gml:pointMember></gml:MultiPoint>"
        );
        let text = write_gml(&ml0().into());
        assert!(text.starts_with("<gml:MultiCurve><gml:curveMember><gml:LineString>"));
        assert_eq!(text.matches("<gml:curveMember>").count(), 2);

        let text = write_gml(&mpoly0().into());
        assert!(text.starts_with("<gml:MultiSurface><gml:surfaceMember><gml:Polygon>"));
        assert_eq!(text.matches("<gml:surfaceMember>").count(), 2);
        assert_eq!(text.matches("<gml:interior>").count(), 1);

        assert_eq!(
            write_gml(&gc0().into()),
            "<gml:MultiGeometry><gml:geometryMember><gml:Point><gml:coordinates>4 6</gml:coordinates></gml:Point></gml:geometryMember><gml:geometryMember><gml:LineString><gml:coordinates>4 6 7 10</gml:coordinates></gml:LineString></gml:geometryMember></gml:MultiGeometry>"
        );
    }

    #[test]
    fn root_attributes() {
        let options = GmlWriteOptions {
            srs_name: Some(srid_to_urn(3857)),
            gml_id: Some("a<b".to_string()),
            namespace: true,
        };
        assert_eq!(
            write_gml_with_options(&poly_z().into(), &options),
            "<gml:Polygon gml:id=\"a&lt;b\" xmlns:gml=\"http://www.opengis.net/gml/3.2\" srsName=\"urn:ogc:def:crs:EPSG::3857\" srsDimension=\"3\"><gml:exterior><gml:LinearRing><gml:coordinates>1 2 3 4 5 6 7 8 9 1 2 3</gml:coordinates></gml:LinearRing></gml:exterior></gml:Polygon>"
        );

        // Members never repeat the root attributes.
        let text = write_gml_with_options(&gc0().into(), &options);
        assert_eq!(text.matches("srsName").count(), 1);
        assert!(!text.contains("srsDimension"));
    }

    #[test]
    fn mixed_collection_dimension() {
        let collection = GeometryCollection::new(vec![
            Point::new(1., 2.).into(),
            Point::new_3d(1., 2., 3.).into(),
        ]);
        assert_eq!(
            write_gml(&collection.into()),
            "<gml:MultiGeometry srsDimension=\"3\"><gml:geometryMember><gml:Point><gml:coordinates>1 2</gml:coordinates></gml:Point></gml:geometryMember><gml:geometryMember><gml:Point><gml:coordinates>1 2 3</gml:coordinates></gml:Point></gml:geometryMember></gml:MultiGeometry>"
        );
    }

    #[test]
    fn measures_are_dropped() {
        let point = Point::try_new(Dimension::XYZM, vec![1., 2., 3., 4.]).unwrap();
        assert_eq!(
            write_gml(&point.into()),
            "<gml:Point srsDimension=\"3\"><gml:coordinates>1 2 3</gml:coordinates></gml:Point>"
        );
        let point = Point::try_new(Dimension::XYM, vec![1., 2., 4.]).unwrap();
        assert_eq!(
            write_gml(&point.into()),
            "<gml:Point><gml:coordinates>1 2</gml:coordinates></gml:Point>"
        );
    }
}
