//! Readers and writers for the supported geometry formats, and interop with [`geo`].

pub mod format;
pub mod geo;
pub mod geojson;
pub mod gml;
pub mod kml;
pub mod wkb;
pub mod wkt;

pub use format::{decode, encode, GeoFormat};

/// Deepest collection nesting the decoders accept.
pub(crate) const MAX_NESTING_DEPTH: usize = 128;

pub(crate) fn nesting_message() -> String {
    format!("geometry nesting exceeds {MAX_NESTING_DEPTH}")
}
