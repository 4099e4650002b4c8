use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geometry::{check_offsets, check_stride, flatten_coords, LineStringRef};

/// A polygon: ring 0 is the exterior, the remaining rings are holes.
///
/// All rings share one flat coordinate buffer. `ring_offsets` has one entry per ring plus a
/// trailing entry, counted in positions (not values).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    coords: Vec<f64>,
    ring_offsets: Vec<usize>,
    dim: Dimension,
}

impl Polygon {
    pub fn try_new(dim: Dimension, coords: Vec<f64>, ring_offsets: Vec<usize>) -> Result<Self> {
        check_stride(&coords, dim)?;
        check_offsets(&ring_offsets, coords.len() / dim.size(), "ring")?;
        Ok(Self {
            coords,
            ring_offsets,
            dim,
        })
    }

    /// Construct from nested rings of position tuples.
    pub fn from_rings<R, C>(dim: Dimension, rings: &[R]) -> Result<Self>
    where
        R: AsRef<[C]>,
        C: AsRef<[f64]>,
    {
        let mut coords = vec![];
        let mut ring_offsets = Vec::with_capacity(rings.len() + 1);
        ring_offsets.push(0);
        for ring in rings {
            let ring = ring.as_ref();
            coords.extend(flatten_coords(dim, ring)?);
            ring_offsets.push(coords.len() / dim.size());
        }
        Ok(Self {
            coords,
            ring_offsets,
            dim,
        })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            ring_offsets: vec![0],
            dim,
        }
    }

    pub fn as_view(&self) -> PolygonRef<'_> {
        PolygonRef::new(&self.coords, &self.ring_offsets, self.dim)
    }

    pub fn num_rings(&self) -> usize {
        self.ring_offsets.len() - 1
    }

    pub fn ring(&self, i: usize) -> Option<LineStringRef<'_>> {
        self.as_view().ring(i)
    }

    pub fn rings(&self) -> impl Iterator<Item = LineStringRef<'_>> {
        self.as_view().rings()
    }

    pub fn exterior(&self) -> Option<LineStringRef<'_>> {
        self.ring(0)
    }

    pub fn num_interiors(&self) -> usize {
        self.num_rings().saturating_sub(1)
    }

    pub fn interior(&self, i: usize) -> Option<LineStringRef<'_>> {
        self.ring(i + 1)
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

    pub fn ring_offsets(&self) -> &[usize] {
        &self.ring_offsets
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

impl From<Vec<Vec<[f64; 2]>>> for Polygon {
    fn from(value: Vec<Vec<[f64; 2]>>) -> Self {
        let mut coords = vec![];
        let mut ring_offsets = vec![0];
        for ring in value {
            coords.extend(ring.into_iter().flatten());
            ring_offsets.push(coords.len() / 2);
        }
        Self {
            coords,
            ring_offsets,
            dim: Dimension::XY,
        }
    }
}

impl From<Vec<Vec<[f64; 3]>>> for Polygon {
    fn from(value: Vec<Vec<[f64; 3]>>) -> Self {
        let mut coords = vec![];
        let mut ring_offsets = vec![0];
        for ring in value {
            coords.extend(ring.into_iter().flatten());
            ring_offsets.push(coords.len() / 3);
        }
        Self {
            coords,
            ring_offsets,
            dim: Dimension::XYZ,
        }
    }
}

/// A borrowed polygon.
///
/// `ring_offsets` are absolute positions into `values`, so a polygon inside a multi polygon
/// borrows the parent's buffer directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonRef<'a> {
    values: &'a [f64],
    ring_offsets: &'a [usize],
    dim: Dimension,
}

impl<'a> PolygonRef<'a> {
    pub(crate) fn new(values: &'a [f64], ring_offsets: &'a [usize], dim: Dimension) -> Self {
        Self {
            values,
            ring_offsets,
            dim,
        }
    }

    pub fn num_rings(&self) -> usize {
        self.ring_offsets.len().saturating_sub(1)
    }

    pub fn ring(&self, i: usize) -> Option<LineStringRef<'a>> {
        if i >= self.num_rings() {
            return None;
        }
        let stride = self.dim.size();
        let start = self.ring_offsets[i] * stride;
        let end = self.ring_offsets[i + 1] * stride;
        Some(LineStringRef::new(&self.values[start..end], self.dim))
    }

    pub fn rings(self) -> impl Iterator<Item = LineStringRef<'a>> {
        (0..self.num_rings()).filter_map(move |i| self.ring(i))
    }

    pub fn exterior(&self) -> Option<LineStringRef<'a>> {
        self.ring(0)
    }

    pub fn num_interiors(&self) -> usize {
        self.num_rings().saturating_sub(1)
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// Number of positions over all rings.
    pub fn num_coords(&self) -> usize {
        match (self.ring_offsets.first(), self.ring_offsets.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoError;
    use crate::test::polygon::{poly0, poly1};

    #[test]
    fn rings() {
        let polygon = poly1();
        assert_eq!(polygon.num_rings(), 2);
        assert_eq!(polygon.num_interiors(), 1);
        assert_eq!(polygon.exterior().unwrap().num_coords(), 5);
        assert_eq!(polygon.interior(0).unwrap().coord(0).unwrap().x(), 1.);
        assert!(polygon.interior(1).is_none());
        assert!(polygon.rings().all(|ring| ring.is_closed()));

        assert_eq!(poly0().num_interiors(), 0);
        assert_eq!(poly0().as_view().num_coords(), 5);
    }

    #[test]
    fn from_nested_rings() {
        let rings = vec![vec![
            vec![0., 0.],
            vec![1., 0.],
            vec![1., 1.],
            vec![0., 0.],
        ]];
        let polygon = Polygon::from_rings(Dimension::XY, &rings).unwrap();
        assert_eq!(polygon.ring_offsets(), &[0, 4]);
    }

    #[test]
    fn offsets_are_checked() {
        assert!(matches!(
            Polygon::try_new(Dimension::XY, vec![0., 0., 1., 1.], vec![0, 3]),
            Err(GeoError::StructuralViolation(_))
        ));
        assert!(matches!(
            Polygon::try_new(Dimension::XY, vec![0., 0., 1., 1.], vec![]),
            Err(GeoError::StructuralViolation(_))
        ));
    }

    #[test]
    fn empty_polygon() {
        let polygon = Polygon::empty(Dimension::XY);
        assert!(polygon.is_empty());
        assert_eq!(polygon.num_rings(), 0);
        assert!(polygon.exterior().is_none());
    }
}
