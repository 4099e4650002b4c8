//! Simple Features geometries with GeoJSON, WKT, WKB/EWKB, GML and KML codecs.
//!
//! Every geometry kind is held in an owned, flat coordinate buffer ([`geometry`]) and converted
//! to and from the wire formats in [`io`]. GeoJSON features and feature collections keep their
//! properties in insertion order.
//!
//! ```
//! use geofeatures::io::wkt::{read_wkt, write_wkt};
//! use geofeatures::io::wkb::{read_wkb, to_wkb};
//!
//! let (geometry, srid) = read_wkt(b"SRID=3857;LINESTRING(0 0,1 1)").unwrap();
//! let ewkb = to_wkb(&geometry, srid).unwrap();
//! let (decoded, decoded_srid) = read_wkb(ewkb.as_slice()).unwrap();
//! assert_eq!(write_wkt(&decoded, decoded_srid), "SRID=3857;LINESTRING(0 0,1 1)");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{GeoError, Result};
pub use feature::{Feature, FeatureId, JsonObject};
pub use feature_collection::FeatureCollection;
pub use geometry::{Geometry, GeometryData};

pub mod algorithm;
pub mod datatypes;
pub mod error;
pub mod feature;
pub mod feature_collection;
pub mod geometry;
pub mod io;
pub mod srid;
#[cfg(test)]
pub(crate) mod test;
