//! Read from and write to [GeoJSON](https://geojson.org/).
//!
//! Besides RFC 7946 members, an integer `"epsg"` on geometry objects, `"ext-data"` on features
//! and `"properties"` on feature collections are read and written back.

pub use reader::{read_feature, read_feature_collection, read_geometry};
pub use writer::{to_string, write_feature, write_feature_collection, write_geometry};

mod reader;
mod writer;
