//! Conversions between integer SRIDs and OGC CRS URNs.

use serde_json::Value;

use crate::feature::JsonObject;

/// SRID assumed when a binary geometry carries none.
pub const DEFAULT_SRID: u32 = 4326;

/// URN of WGS 84 with longitude/latitude axis order.
pub const CRS84_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

const CRS84_URN_SHORT: &str = "urn:ogc:def:crs:OGC::CRS84";
const EPSG_URN_PREFIX: &str = "urn:ogc:def:crs:EPSG::";

/// Render an SRID as a CRS URN. 4326 maps to the CRS84 URN.
pub fn srid_to_urn(srid: i32) -> String {
    if srid == 4326 {
        CRS84_URN.to_string()
    } else {
        format!("{EPSG_URN_PREFIX}{srid}")
    }
}

/// Parse a CRS URN back into an SRID, returning -1 when the URN is not recognized.
pub fn urn_to_srid(urn: &str) -> i32 {
    if urn == CRS84_URN || urn == CRS84_URN_SHORT {
        return 4326;
    }
    urn.strip_prefix(EPSG_URN_PREFIX)
        .filter(|code| !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|code| code.parse::<i32>().ok())
        .unwrap_or(-1)
}

/// A GeoJSON named CRS object: `{"type": "name", "properties": {"name": <urn>}}`.
pub fn named_crs(srid: i32) -> JsonObject {
    let mut properties = serde_json::Map::new();
    properties.insert("name".to_string(), Value::String(srid_to_urn(srid)));

    let mut crs = JsonObject::new();
    crs.insert("type".to_string(), Value::String("name".to_string()));
    crs.insert("properties".to_string(), Value::Object(properties));
    crs
}

/// Read the SRID out of a named CRS object.
pub fn srid_from_crs(crs: &JsonObject) -> Option<i32> {
    if crs.get("type").and_then(Value::as_str) != Some("name") {
        return None;
    }
    let urn = crs.get("properties")?.get("name")?.as_str()?;
    match urn_to_srid(urn) {
        -1 => None,
        srid => Some(srid),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn to_urn() {
        assert_eq!(srid_to_urn(4326), "urn:ogc:def:crs:OGC:1.3:CRS84");
        assert_eq!(srid_to_urn(3857), "urn:ogc:def:crs:EPSG::3857");
        assert_eq!(srid_to_urn(4490), "urn:ogc:def:crs:EPSG::4490");
    }

    #[test]
    fn from_urn() {
        assert_eq!(urn_to_srid("urn:ogc:def:crs:OGC:1.3:CRS84"), 4326);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:OGC::CRS84"), 4326);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:EPSG::3857"), 3857);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:EPSG::1234"), 1234);

        assert_eq!(urn_to_srid("garbage"), -1);
        assert_eq!(urn_to_srid("invalid_urn"), -1);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:EPSG:1234"), -1);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:EPSG::abc"), -1);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:EPSG::-5"), -1);
        assert_eq!(urn_to_srid("urn:ogc:def:crs:EPSG::"), -1);
    }

    #[test]
    fn round_trip() {
        for srid in [4326, 3857, 4490, 27700, 0] {
            assert_eq!(urn_to_srid(&srid_to_urn(srid)), srid);
        }
    }

    #[test]
    fn named_crs_object() {
        let crs = named_crs(3857);
        assert_eq!(
            serde_json::to_string(&crs).unwrap(),
            r#"{"type":"name","properties":{"name":"urn:ogc:def:crs:EPSG::3857"}}"#
        );
        assert_eq!(srid_from_crs(&crs), Some(3857));

        let mut other = JsonObject::new();
        other.insert("type".to_string(), Value::String("link".to_string()));
        assert_eq!(srid_from_crs(&other), None);
    }
}
