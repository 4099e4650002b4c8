use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geometry::coord::coord_iter;
use crate::geometry::{check_stride, flatten_coords, Coord};

/// An unordered-in-meaning, ordered-in-storage set of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    coords: Vec<f64>,
    dim: Dimension,
}

impl MultiPoint {
    pub fn try_new(dim: Dimension, coords: Vec<f64>) -> Result<Self> {
        check_stride(&coords, dim)?;
        Ok(Self { coords, dim })
    }

    pub fn from_coords<C: AsRef<[f64]>>(dim: Dimension, coords: &[C]) -> Result<Self> {
        Ok(Self {
            coords: flatten_coords(dim, coords)?,
            dim,
        })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            dim,
        }
    }

    pub fn num_points(&self) -> usize {
        self.coords.len() / self.dim.size()
    }

    pub fn point(&self, i: usize) -> Option<Coord<'_>> {
        let stride = self.dim.size();
        self.coords
            .get(i * stride..(i + 1) * stride)
            .map(|values| Coord::new(values, self.dim))
    }

    pub fn points(&self) -> impl Iterator<Item = Coord<'_>> {
        coord_iter(&self.coords, self.dim)
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.coords
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

impl From<Vec<[f64; 2]>> for MultiPoint {
    fn from(value: Vec<[f64; 2]>) -> Self {
        Self {
            coords: value.into_iter().flatten().collect(),
            dim: Dimension::XY,
        }
    }
}

impl From<Vec<[f64; 3]>> for MultiPoint {
    fn from(value: Vec<[f64; 3]>) -> Self {
        Self {
            coords: value.into_iter().flatten().collect(),
            dim: Dimension::XYZ,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::multipoint::mp0;

    #[test]
    fn points() {
        let multi_point = mp0();
        assert_eq!(multi_point.num_points(), 2);
        assert_eq!(multi_point.point(1).unwrap().as_slice(), &[1., 2.]);
        assert!(multi_point.point(2).is_none());
        assert_eq!(multi_point.points().count(), 2);
    }
}
