//! Algorithms implemented on the geometry model: bounding boxes, structural equality and
//! coordinate mapping.

pub mod native;
