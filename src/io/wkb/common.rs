use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoError, Result};

/// EWKB flag: coordinates carry a z value.
pub(crate) const EWKB_Z: u32 = 0x8000_0000;
/// EWKB flag: coordinates carry an m value.
pub(crate) const EWKB_M: u32 = 0x4000_0000;
/// EWKB flag: a 4-byte SRID follows the type word.
pub(crate) const EWKB_SRID: u32 = 0x2000_0000;

/// The primitive geometry kind stored in the low bits of a WKB type word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WKBType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl From<GeometryType> for WKBType {
    fn from(value: GeometryType) -> Self {
        match value {
            GeometryType::Point => WKBType::Point,
            GeometryType::LineString => WKBType::LineString,
            GeometryType::Polygon => WKBType::Polygon,
            GeometryType::MultiPoint => WKBType::MultiPoint,
            GeometryType::MultiLineString => WKBType::MultiLineString,
            GeometryType::MultiPolygon => WKBType::MultiPolygon,
            GeometryType::GeometryCollection => WKBType::GeometryCollection,
        }
    }
}

/// Byte order of a WKB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    BigEndian,
    #[default]
    LittleEndian,
}

impl TryFrom<u8> for Endianness {
    type Error = GeoError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Endianness::BigEndian),
            1 => Ok(Endianness::LittleEndian),
            other => Err(GeoError::MalformedSyntax(format!(
                "illegal WKB byte order {other}"
            ))),
        }
    }
}

impl From<Endianness> for u8 {
    fn from(value: Endianness) -> Self {
        use Endianness::*;
        match value {
            BigEndian => 0,
            LittleEndian => 1,
        }
    }
}

/// A decoded type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeCode {
    pub kind: WKBType,
    pub dim: Dimension,
    pub has_srid: bool,
}

impl TypeCode {
    /// Decode either an ISO code (kind + 1000/2000/3000) or an EWKB word with high-bit flags.
    pub fn decode(word: u32) -> Result<Self> {
        let code = word & 0xFFFF;
        let iso_dim = match code / 1000 {
            0 => Dimension::XY,
            1 => Dimension::XYZ,
            2 => Dimension::XYM,
            3 => Dimension::XYZM,
            _ => return Err(unknown_type(word)),
        };
        let kind = WKBType::try_from(code % 1000).map_err(|_| unknown_type(word))?;
        let dim = Dimension::from_flags(
            iso_dim.has_z() || word & EWKB_Z != 0,
            iso_dim.has_m() || word & EWKB_M != 0,
        );
        Ok(Self {
            kind,
            dim,
            has_srid: word & EWKB_SRID != 0,
        })
    }

    /// ISO type word: the kind plus 1000 for Z, 2000 for M, 3000 for ZM.
    pub fn iso(kind: WKBType, dim: Dimension) -> u32 {
        let offset = match dim {
            Dimension::XY => 0,
            Dimension::XYZ => 1000,
            Dimension::XYM => 2000,
            Dimension::XYZM => 3000,
        };
        u32::from(kind) + offset
    }

    /// EWKB type word: the kind with z, m and SRID flags in the high bits.
    pub fn ewkb(kind: WKBType, dim: Dimension, has_srid: bool) -> u32 {
        let mut word = u32::from(kind);
        if dim.has_z() {
            word |= EWKB_Z;
        }
        if dim.has_m() {
            word |= EWKB_M;
        }
        if has_srid {
            word |= EWKB_SRID;
        }
        word
    }
}

fn unknown_type(word: u32) -> GeoError {
    GeoError::UnsupportedVariant(format!("unknown WKB geometry type {word:#010x}"))
}
