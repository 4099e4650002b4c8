//! Encode and decode a single geometry in any supported format.

use std::fmt;

use crate::error::{GeoError, Result};
use crate::geometry::{Geometry, GeometryData};
use crate::io::{geojson, gml, kml, wkb, wkt};

/// A geometry serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoFormat {
    GeoJson,
    Wkt,
    Wkb,
    Gml,
    Kml,
}

impl GeoFormat {
    /// Whether [`decode`] supports this format.
    pub fn can_decode(&self) -> bool {
        !matches!(self, GeoFormat::Gml | GeoFormat::Kml)
    }
}

impl fmt::Display for GeoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeoFormat::GeoJson => "GeoJSON",
            GeoFormat::Wkt => "WKT",
            GeoFormat::Wkb => "WKB",
            GeoFormat::Gml => "GML",
            GeoFormat::Kml => "KML",
        };
        f.write_str(name)
    }
}

/// Encode `geometry` as `format`.
///
/// The SRID becomes the `epsg` member in GeoJSON, the `SRID=` prefix in WKT and the embedded SRID
/// of EWKB. GML and KML carry no SRID; use
/// [`write_gml_with_options`](crate::io::gml::write_gml_with_options) to set `srsName`.
///
/// ```
/// use geofeatures::geometry::Point;
/// use geofeatures::io::format::{encode, GeoFormat};
///
/// let bytes = encode(GeoFormat::Wkt, &Point::new(1., 2.).into(), Some(3857)).unwrap();
/// assert_eq!(bytes, b"SRID=3857;POINT(1 2)");
/// ```
pub fn encode(format: GeoFormat, geometry: &Geometry, srid: Option<u32>) -> Result<Vec<u8>> {
    let bytes = match format {
        GeoFormat::GeoJson => {
            let mut data = GeometryData::from(geometry.clone());
            if let Some(srid) = srid {
                let epsg = i32::try_from(srid).map_err(|_| {
                    GeoError::StructuralViolation(format!("SRID {srid} is not a valid EPSG code"))
                })?;
                data = data.with_epsg(epsg);
            }
            let mut out = vec![];
            geojson::write_geometry(&mut out, &data)?;
            out
        }
        GeoFormat::Wkt => wkt::write_wkt(geometry, srid).into_bytes(),
        GeoFormat::Wkb => wkb::to_wkb(geometry, srid)?,
        GeoFormat::Gml => gml::write_gml(geometry).into_bytes(),
        GeoFormat::Kml => kml::write_kml(geometry).into_bytes(),
    };
    Ok(bytes)
}

/// Decode a geometry and its SRID from `format`.
///
/// GML and KML are write-only and return [`GeoError::UnsupportedVariant`].
pub fn decode(format: GeoFormat, input: &[u8]) -> Result<(Geometry, Option<u32>)> {
    match format {
        GeoFormat::GeoJson => {
            let data = geojson::read_geometry(input)?;
            let srid = data.epsg.and_then(|epsg| u32::try_from(epsg).ok());
            Ok((data.into_geometry()?, srid))
        }
        GeoFormat::Wkt => wkt::read_wkt(input),
        GeoFormat::Wkb => wkb::read_wkb(input),
        GeoFormat::Gml | GeoFormat::Kml => Err(GeoError::UnsupportedVariant(format!(
            "decoding {format} is not supported"
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::native::geometry_eq;
    use crate::test::{geometrycollection::gc0, multipolygon::mpoly_z, polygon::poly1};

    #[test]
    fn round_trip_every_decodable_format() {
        let geometries: Vec<Geometry> = vec![poly1().into(), mpoly_z().into(), gc0().into()];
        for format in [GeoFormat::GeoJson, GeoFormat::Wkt, GeoFormat::Wkb] {
            assert!(format.can_decode());
            for geometry in &geometries {
                let bytes = encode(format, geometry, Some(3857)).unwrap();
                let (decoded, srid) = decode(format, &bytes).unwrap();
                assert_eq!(srid, Some(3857), "{format}");
                assert!(geometry_eq(&decoded, geometry), "{format}");
            }
        }
    }

    #[test]
    fn geojson_carries_srid_as_epsg() {
        let bytes = encode(GeoFormat::GeoJson, &poly1().into(), Some(4326)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with(r#""epsg":4326}"#), "{text}");

        let (_, srid) = decode(GeoFormat::GeoJson, br#"{"type":"Point","coordinates":[1,2]}"#)
            .unwrap();
        assert_eq!(srid, None);
    }

    #[test]
    fn write_only_formats() {
        for format in [GeoFormat::Gml, GeoFormat::Kml] {
            assert!(!format.can_decode());
            let bytes = encode(format, &gc0().into(), None).unwrap();
            assert!(!bytes.is_empty());
            assert!(matches!(
                decode(format, &bytes),
                Err(GeoError::UnsupportedVariant(_))
            ));
        }
    }
}
