use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::datatypes::Dimension;
use crate::error::{GeoError, Result};
use crate::geometry::{Coord, Geometry, LineStringRef, PolygonRef};
use crate::io::wkb::common::{Endianness, TypeCode, WKBType};

/// Options for [`write_wkb_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WkbWriteOptions {
    pub endianness: Endianness,
}

/// Header size: byte order plus type word.
const HEADER_SIZE: usize = 1 + 4;

/// The number of bytes [`write_wkb`] produces for `geometry` without an SRID. An SRID adds 4.
pub fn geometry_wkb_size(geometry: &Geometry) -> usize {
    let coord_size = geometry.dim().size() * 8;
    let ring_size = |ring: LineStringRef<'_>| 4 + ring.num_coords() * coord_size;
    let polygon_size =
        |polygon: PolygonRef<'_>| HEADER_SIZE + 4 + polygon.rings().map(ring_size).sum::<usize>();

    match geometry {
        Geometry::Point(_) => HEADER_SIZE + coord_size,
        Geometry::LineString(line) => HEADER_SIZE + ring_size(line.as_view()),
        Geometry::Polygon(polygon) => polygon_size(polygon.as_view()),
        Geometry::MultiPoint(points) => {
            HEADER_SIZE + 4 + points.num_points() * (HEADER_SIZE + coord_size)
        }
        Geometry::MultiLineString(lines) => {
            HEADER_SIZE + 4 + lines.lines().map(|line| HEADER_SIZE + ring_size(line)).sum::<usize>()
        }
        Geometry::MultiPolygon(polygons) => {
            HEADER_SIZE + 4 + polygons.polygons().map(polygon_size).sum::<usize>()
        }
        Geometry::GeometryCollection(collection) => {
            HEADER_SIZE + 4 + collection.iter().map(geometry_wkb_size).sum::<usize>()
        }
    }
}

/// Encode a geometry as little-endian WKB.
///
/// With an SRID the output is EWKB: the outermost type word carries the SRID flag followed by the
/// SRID, and every type word uses the EWKB z/m flags. Without one it is ISO WKB.
pub fn write_wkb<W: Write>(writer: W, geometry: &Geometry, srid: Option<u32>) -> Result<()> {
    write_wkb_with_options(writer, geometry, srid, &WkbWriteOptions::default())
}

pub fn write_wkb_with_options<W: Write>(
    mut writer: W,
    geometry: &Geometry,
    srid: Option<u32>,
    options: &WkbWriteOptions,
) -> Result<()> {
    tracing::trace!(
        kind = %geometry.geometry_type(),
        srid = ?srid,
        endianness = ?options.endianness,
        "encoding WKB"
    );
    match options.endianness {
        Endianness::LittleEndian => {
            WkbWriter::<_, LittleEndian>::new(&mut writer, options.endianness, srid.is_some())
                .geometry(geometry, srid)
        }
        Endianness::BigEndian => {
            WkbWriter::<_, BigEndian>::new(&mut writer, options.endianness, srid.is_some())
                .geometry(geometry, srid)
        }
    }
}

/// Encode a geometry into a new buffer.
pub fn to_wkb(geometry: &Geometry, srid: Option<u32>) -> Result<Vec<u8>> {
    let size = geometry_wkb_size(geometry) + if srid.is_some() { 4 } else { 0 };
    let mut out = Vec::with_capacity(size);
    write_wkb(&mut out, geometry, srid)?;
    Ok(out)
}

fn count(n: usize) -> Result<u32> {
    u32::try_from(n)
        .map_err(|_| GeoError::StructuralViolation(format!("{n} elements exceed the WKB limit")))
}

struct WkbWriter<'a, W: Write, B: ByteOrder> {
    writer: &'a mut W,
    endianness: Endianness,
    extended: bool,
    byte_order: std::marker::PhantomData<B>,
}

impl<'a, W: Write, B: ByteOrder> WkbWriter<'a, W, B> {
    fn new(writer: &'a mut W, endianness: Endianness, extended: bool) -> Self {
        Self {
            writer,
            endianness,
            extended,
            byte_order: std::marker::PhantomData,
        }
    }

    fn header(&mut self, kind: WKBType, dim: Dimension, srid: Option<u32>) -> Result<()> {
        self.writer.write_u8(self.endianness.into())?;
        let word = if self.extended {
            TypeCode::ewkb(kind, dim, srid.is_some())
        } else {
            TypeCode::iso(kind, dim)
        };
        self.writer.write_u32::<B>(word)?;
        if let Some(srid) = srid {
            self.writer.write_u32::<B>(srid)?;
        }
        Ok(())
    }

    fn len(&mut self, n: usize) -> Result<()> {
        self.writer.write_u32::<B>(count(n)?)?;
        Ok(())
    }

    fn coord(&mut self, coord: Coord<'_>) -> Result<()> {
        for value in coord.as_slice() {
            self.writer.write_f64::<B>(*value)?;
        }
        Ok(())
    }

    /// Coordinate count followed by the coordinates.
    fn ring(&mut self, ring: LineStringRef<'_>) -> Result<()> {
        self.len(ring.num_coords())?;
        ring.coords().try_for_each(|coord| self.coord(coord))
    }

    fn polygon(&mut self, polygon: PolygonRef<'_>, srid: Option<u32>) -> Result<()> {
        self.header(WKBType::Polygon, polygon.dim(), srid)?;
        self.len(polygon.num_rings())?;
        polygon.rings().try_for_each(|ring| self.ring(ring))
    }

    fn geometry(&mut self, geometry: &Geometry, srid: Option<u32>) -> Result<()> {
        let dim = geometry.dim();
        match geometry {
            Geometry::Point(point) => {
                self.header(WKBType::Point, dim, srid)?;
                match point.coord() {
                    Some(coord) => self.coord(coord)?,
                    None => {
                        for _ in 0..dim.size() {
                            self.writer.write_f64::<B>(f64::NAN)?;
                        }
                    }
                }
            }
            Geometry::LineString(line) => {
                self.header(WKBType::LineString, dim, srid)?;
                self.ring(line.as_view())?;
            }
            Geometry::Polygon(polygon) => self.polygon(polygon.as_view(), srid)?,
            Geometry::MultiPoint(points) => {
                self.header(WKBType::MultiPoint, dim, srid)?;
                self.len(points.num_points())?;
                for point in points.points() {
                    self.header(WKBType::Point, dim, None)?;
                    self.coord(point)?;
                }
            }
            Geometry::MultiLineString(lines) => {
                self.header(WKBType::MultiLineString, dim, srid)?;
                self.len(lines.num_lines())?;
                for line in lines.lines() {
                    self.header(WKBType::LineString, dim, None)?;
                    self.ring(line)?;
                }
            }
            Geometry::MultiPolygon(polygons) => {
                self.header(WKBType::MultiPolygon, dim, srid)?;
                self.len(polygons.num_polygons())?;
                for polygon in polygons.polygons() {
                    self.polygon(polygon, None)?;
                }
            }
            Geometry::GeometryCollection(collection) => {
                self.header(WKBType::GeometryCollection, dim, srid)?;
                self.len(collection.num_geometries())?;
                for member in collection.iter() {
                    self.geometry(member, None)?;
                }
            }
        }
        Ok(())
    }
}
