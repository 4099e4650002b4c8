use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geometry::coord::coord_iter;
use crate::geometry::{check_stride, flatten_coords, Coord};

/// An ordered sequence of positions stored in one flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    coords: Vec<f64>,
    dim: Dimension,
}

impl LineString {
    /// Construct from a flat buffer whose length must be a multiple of `dim.size()`.
    pub fn try_new(dim: Dimension, coords: Vec<f64>) -> Result<Self> {
        check_stride(&coords, dim)?;
        Ok(Self { coords, dim })
    }

    /// Construct from one tuple per position.
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

    pub fn as_view(&self) -> LineStringRef<'_> {
        LineStringRef::new(&self.coords, self.dim)
    }

    pub fn num_coords(&self) -> usize {
        self.coords.len() / self.dim.size()
    }

    pub fn coord(&self, i: usize) -> Option<Coord<'_>> {
        self.as_view().coord(i)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord<'_>> {
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

impl From<Vec<[f64; 2]>> for LineString {
    fn from(value: Vec<[f64; 2]>) -> Self {
        Self {
            coords: value.into_iter().flatten().collect(),
            dim: Dimension::XY,
        }
    }
}

impl From<Vec<[f64; 3]>> for LineString {
    fn from(value: Vec<[f64; 3]>) -> Self {
        Self {
            coords: value.into_iter().flatten().collect(),
            dim: Dimension::XYZ,
        }
    }
}

/// A borrowed run of positions: a line string, a polygon ring or a member of a multi line string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStringRef<'a> {
    values: &'a [f64],
    dim: Dimension,
}

impl<'a> LineStringRef<'a> {
    pub(crate) fn new(values: &'a [f64], dim: Dimension) -> Self {
        Self { values, dim }
    }

    pub fn num_coords(&self) -> usize {
        self.values.len() / self.dim.size()
    }

    pub fn coord(&self, i: usize) -> Option<Coord<'a>> {
        let stride = self.dim.size();
        self.values
            .get(i * stride..(i + 1) * stride)
            .map(|values| Coord::new(values, self.dim))
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord<'a>> {
        coord_iter(self.values, self.dim)
    }

    /// Whether the first and last positions are identical.
    pub fn is_closed(&self) -> bool {
        match (self.coord(0), self.num_coords().checked_sub(1)) {
            (Some(first), Some(last_idx)) => self
                .coord(last_idx)
                .is_some_and(|last| first.as_slice() == last.as_slice()),
            _ => false,
        }
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoError;
    use crate::test::linestring::{ls0, ls_z};

    #[test]
    fn access_coords() {
        let line = ls0();
        assert_eq!(line.num_coords(), 2);
        assert_eq!(line.coord(1).unwrap().as_slice(), &[1., 2.]);
        assert!(line.coord(2).is_none());
        assert_eq!(ls_z().coord(0).unwrap().z(), Some(10.));
    }

    #[test]
    fn stride_is_checked() {
        assert!(matches!(
            LineString::try_new(Dimension::XYZ, vec![0., 1., 2., 3.]),
            Err(GeoError::StructuralViolation(_))
        ));
        assert!(matches!(
            LineString::from_coords(Dimension::XY, &[vec![0., 1.], vec![0., 1., 2.]]),
            Err(GeoError::StructuralViolation(_))
        ));
    }

    #[test]
    fn closed_ring() {
        let ring: LineString = vec![[0., 0.], [1., 0.], [1., 1.], [0., 0.]].into();
        assert!(ring.as_view().is_closed());
        assert!(!ls0().as_view().is_closed());
        assert!(!LineString::empty(Dimension::XY).as_view().is_closed());
    }
}
