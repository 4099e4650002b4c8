pub mod bounding_box;
pub mod eq;
pub mod map_coords;

pub use bounding_box::{merge_bounding_boxes, BoundingBox, BoundingBoxBuilder, ComputeBounds};
pub use eq::{equals_structural, geometry_eq};
pub use map_coords::MapCoords;
