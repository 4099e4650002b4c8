use crate::datatypes::Dimension;
use crate::error::{GeoError, Result};
use crate::geometry::Coord;

/// A single position, or an empty point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coords: Vec<f64>,
    dim: Dimension,
}

impl Point {
    /// A 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            coords: vec![x, y],
            dim: Dimension::XY,
        }
    }

    /// A 3D point.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: vec![x, y, z],
            dim: Dimension::XYZ,
        }
    }

    /// Construct from a coordinate tuple, which must be empty or hold `dim.size()` values.
    pub fn try_new(dim: Dimension, coords: Vec<f64>) -> Result<Self> {
        if !coords.is_empty() && coords.len() != dim.size() {
            return Err(GeoError::StructuralViolation(format!(
                "point with dimension {dim} needs {} values, got {}",
                dim.size(),
                coords.len()
            )));
        }
        Ok(Self { coords, dim })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            dim,
        }
    }

    pub fn coord(&self) -> Option<Coord<'_>> {
        (!self.coords.is_empty()).then(|| Coord::new(&self.coords, self.dim))
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The raw coordinate values.
    pub fn values(&self) -> &[f64] {
        &self.coords
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<[f64; 3]> for Point {
    fn from(value: [f64; 3]) -> Self {
        Self::new_3d(value[0], value[1], value[2])
    }
}
