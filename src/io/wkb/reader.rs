use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::datatypes::Dimension;
use crate::error::{GeoError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::io::wkb::common::{Endianness, TypeCode, WKBType};
use crate::io::{nesting_message, MAX_NESTING_DEPTH};
use crate::srid::DEFAULT_SRID;

/// Options for [`read_wkb_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbReadOptions {
    /// SRID reported when the input carries none.
    pub default_srid: Option<u32>,
}

impl Default for WkbReadOptions {
    fn default() -> Self {
        Self {
            default_srid: Some(DEFAULT_SRID),
        }
    }
}

/// Decode a WKB or EWKB geometry, returning it with its SRID.
///
/// The dialect is detected from the type word. Input without an embedded SRID reports
/// [`DEFAULT_SRID`].
pub fn read_wkb<R: Read>(reader: R) -> Result<(Geometry, Option<u32>)> {
    read_wkb_with_options(reader, &WkbReadOptions::default())
}

pub fn read_wkb_with_options<R: Read>(
    mut reader: R,
    options: &WkbReadOptions,
) -> Result<(Geometry, Option<u32>)> {
    let header = read_header(&mut reader)?;
    let geometry = read_body(&mut reader, &header, 0)?;
    let srid = header.srid.or(options.default_srid);
    tracing::debug!(
        kind = %geometry.geometry_type(),
        dimension = %geometry.dim(),
        srid = ?srid,
        "decoded WKB"
    );
    Ok((geometry, srid))
}

/// Byte order, type word and optional SRID at the start of every WKB geometry.
struct Header {
    endianness: Endianness,
    kind: WKBType,
    dim: Dimension,
    srid: Option<u32>,
}

fn map_io_error(err: std::io::Error) -> GeoError {
    match err.kind() {
        ErrorKind::UnexpectedEof => GeoError::MalformedSyntax("truncated WKB input".to_string()),
        _ => GeoError::IOError(err),
    }
}

fn read_u32<R: Read>(reader: &mut R, endianness: Endianness) -> Result<u32> {
    match endianness {
        Endianness::BigEndian => reader.read_u32::<BigEndian>(),
        Endianness::LittleEndian => reader.read_u32::<LittleEndian>(),
    }
    .map_err(map_io_error)
}

/// Append `count` coordinates of `dim` to `coords`.
fn read_coords<R: Read>(
    reader: &mut R,
    endianness: Endianness,
    dim: Dimension,
    count: u32,
    coords: &mut Vec<f64>,
) -> Result<()> {
    for _ in 0..(count as usize * dim.size()) {
        let value = match endianness {
            Endianness::BigEndian => reader.read_f64::<BigEndian>(),
            Endianness::LittleEndian => reader.read_f64::<LittleEndian>(),
        }
        .map_err(map_io_error)?;
        coords.push(value);
    }
    Ok(())
}

fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let endianness = Endianness::try_from(reader.read_u8().map_err(map_io_error)?)?;
    let code = TypeCode::decode(read_u32(reader, endianness)?)?;
    let srid = if code.has_srid {
        Some(read_u32(reader, endianness)?)
    } else {
        None
    };
    Ok(Header {
        endianness,
        kind: code.kind,
        dim: code.dim,
        srid,
    })
}

/// Read the header of a member of a multi-geometry, which must be of `kind` and `dim`.
fn read_member_header<R: Read>(reader: &mut R, kind: WKBType, dim: Dimension) -> Result<Header> {
    let header = read_header(reader)?;
    if header.kind != kind || header.dim != dim {
        return Err(GeoError::StructuralViolation(format!(
            "expected {kind:?} {dim} member, got {:?} {}",
            header.kind, header.dim
        )));
    }
    Ok(header)
}

/// Read rings into `coords`, pushing the end of each ring to `ring_offsets`.
fn read_rings<R: Read>(
    reader: &mut R,
    header: &Header,
    coords: &mut Vec<f64>,
    ring_offsets: &mut Vec<usize>,
) -> Result<()> {
    let num_rings = read_u32(reader, header.endianness)?;
    for _ in 0..num_rings {
        let num_coords = read_u32(reader, header.endianness)?;
        read_coords(reader, header.endianness, header.dim, num_coords, coords)?;
        ring_offsets.push(coords.len() / header.dim.size());
    }
    Ok(())
}

/// Read the body of a geometry nested `depth` collections deep.
fn read_body<R: Read>(reader: &mut R, header: &Header, depth: usize) -> Result<Geometry> {
    let Header {
        endianness, dim, ..
    } = *header;
    let mut coords = vec![];

    let geometry = match header.kind {
        WKBType::Point => {
            read_coords(reader, endianness, dim, 1, &mut coords)?;
            if coords.iter().all(|v| v.is_nan()) {
                Point::empty(dim).into()
            } else {
                Point::try_new(dim, coords)?.into()
            }
        }
        WKBType::LineString => {
            let num_coords = read_u32(reader, endianness)?;
            read_coords(reader, endianness, dim, num_coords, &mut coords)?;
            LineString::try_new(dim, coords)?.into()
        }
        WKBType::Polygon => {
            let mut ring_offsets = vec![0];
            read_rings(reader, header, &mut coords, &mut ring_offsets)?;
            Polygon::try_new(dim, coords, ring_offsets)?.into()
        }
        WKBType::MultiPoint => {
            let num_points = read_u32(reader, endianness)?;
            for _ in 0..num_points {
                let member = read_member_header(reader, WKBType::Point, dim)?;
                read_coords(reader, member.endianness, dim, 1, &mut coords)?;
            }
            MultiPoint::try_new(dim, coords)?.into()
        }
        WKBType::MultiLineString => {
            let num_lines = read_u32(reader, endianness)?;
            let mut line_offsets = vec![0];
            for _ in 0..num_lines {
                let member = read_member_header(reader, WKBType::LineString, dim)?;
                let num_coords = read_u32(reader, member.endianness)?;
                read_coords(reader, member.endianness, dim, num_coords, &mut coords)?;
                line_offsets.push(coords.len() / dim.size());
            }
            MultiLineString::try_new(dim, coords, line_offsets)?.into()
        }
        WKBType::MultiPolygon => {
            let num_polygons = read_u32(reader, endianness)?;
            let mut polygon_offsets = vec![0];
            let mut ring_offsets = vec![0];
            for _ in 0..num_polygons {
                let member = read_member_header(reader, WKBType::Polygon, dim)?;
                read_rings(reader, &member, &mut coords, &mut ring_offsets)?;
                polygon_offsets.push(ring_offsets.len() - 1);
            }
            MultiPolygon::try_new(dim, coords, polygon_offsets, ring_offsets)?.into()
        }
        WKBType::GeometryCollection => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(GeoError::MalformedSyntax(nesting_message()));
            }
            let num_geometries = read_u32(reader, endianness)?;
            let mut members = vec![];
            for _ in 0..num_geometries {
                let member = read_header(reader)?;
                members.push(read_body(reader, &member, depth + 1)?);
            }
            GeometryCollection::with_dim(members, dim).into()
        }
    };
    Ok(geometry)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::geometrycollection::gc0;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    const EWKB_XDR: &str = "002000000700006c340000000200000000014010000000000000401800000000000000000000020000000240100000000000004018000000000000401c0000000000004024000000000000";
    const EWKB_NDR: &str = "0107000020346c000002000000010100000000000000000010400000000000001840010200000002000000000000000000104000000000000018400000000000001c400000000000002440";
    const WKB_XDR: &str = "00000000070000000200000000014010000000000000401800000000000000000000020000000240100000000000004018000000000000401c0000000000004024000000000000";
    const WKB_NDR: &str = "010700000002000000010100000000000000000010400000000000001840010200000002000000000000000000104000000000000018400000000000001c400000000000002440";

    #[test]
    fn collection_vectors() {
        for (input, srid) in [
            (EWKB_XDR, Some(27700)),
            (EWKB_NDR, Some(27700)),
            (WKB_XDR, Some(4326)),
            (WKB_NDR, Some(4326)),
        ] {
            let (geometry, decoded_srid) = read_wkb(hex(input).as_slice()).unwrap();
            assert_eq!(decoded_srid, srid);
            assert_eq!(geometry, gc0().into());
        }
    }

    #[test]
    fn default_srid_option() {
        let options = WkbReadOptions { default_srid: None };
        let (_, srid) = read_wkb_with_options(hex(WKB_NDR).as_slice(), &options).unwrap();
        assert_eq!(srid, None);
        let (_, srid) = read_wkb_with_options(hex(EWKB_NDR).as_slice(), &options).unwrap();
        assert_eq!(srid, Some(27700));
    }

    #[test]
    fn iso_point_z() {
        // POINT Z (1 2 3), little-endian ISO
        let input = hex("01e9030000000000000000f03f00000000000000400000000000000840");
        let (geometry, _) = read_wkb(input.as_slice()).unwrap();
        assert_eq!(geometry, Point::new_3d(1., 2., 3.).into());
    }

    #[test]
    fn nan_point_is_empty() {
        let input = hex("0101000000000000000000f87f000000000000f87f");
        let (geometry, _) = read_wkb(input.as_slice()).unwrap();
        assert_eq!(geometry, Point::empty(Dimension::XY).into());
    }

    /// `depth` single-member collections around `POINT(1 2)`.
    fn nested(depth: usize) -> Vec<u8> {
        let mut input = hex("010700000001000000").repeat(depth);
        input.extend(hex("0101000000000000000000f03f0000000000000040"));
        input
    }

    #[test]
    fn collection_nesting_limit() {
        let (geometry, _) = read_wkb(nested(MAX_NESTING_DEPTH).as_slice()).unwrap();
        assert_eq!(geometry.geometry_type(), crate::datatypes::GeometryType::GeometryCollection);

        for depth in [MAX_NESTING_DEPTH + 1, 200_000] {
            let err = read_wkb(nested(depth).as_slice()).unwrap_err();
            assert!(matches!(err, GeoError::MalformedSyntax(_)), "{err}");
            assert!(err.to_string().contains("nesting exceeds 128"), "{err}");
        }
    }

    #[test]
    fn truncated_input() {
        let input = hex(WKB_NDR);
        for len in [0, 1, 4, 9, 20, input.len() - 1] {
            assert!(
                matches!(
                    read_wkb(&input[..len]),
                    Err(GeoError::MalformedSyntax(_))
                ),
                "length {len}"
            );
        }
    }

    #[test]
    fn bad_header() {
        assert!(matches!(
            read_wkb(hex("0201000000").as_slice()),
            Err(GeoError::MalformedSyntax(_))
        ));
        assert!(matches!(
            read_wkb(hex("0109000000").as_slice()),
            Err(GeoError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn member_mismatch() {
        // MULTIPOINT whose member is a LINESTRING
        let input = hex("01040000000100000001020000000000000000");
        assert!(matches!(
            read_wkb(input.as_slice()),
            Err(GeoError::StructuralViolation(_))
        ));

        // 2D MULTIPOINT with a POINT Z member
        let input = hex("01040000000100000001e9030000000000000000f03f00000000000000400000000000000840");
        assert!(matches!(
            read_wkb(input.as_slice()),
            Err(GeoError::StructuralViolation(_))
        ));
    }
}
