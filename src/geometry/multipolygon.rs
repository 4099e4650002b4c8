use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geometry::{check_offsets, check_stride, flatten_coords, PolygonRef};

/// A sequence of polygons sharing one flat coordinate buffer.
///
/// `polygon_offsets` index into `ring_offsets`; `ring_offsets` index positions in `coords`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    coords: Vec<f64>,
    polygon_offsets: Vec<usize>,
    ring_offsets: Vec<usize>,
    dim: Dimension,
}

impl MultiPolygon {
    pub fn try_new(
        dim: Dimension,
        coords: Vec<f64>,
        polygon_offsets: Vec<usize>,
        ring_offsets: Vec<usize>,
    ) -> Result<Self> {
        check_stride(&coords, dim)?;
        check_offsets(&ring_offsets, coords.len() / dim.size(), "ring")?;
        check_offsets(&polygon_offsets, ring_offsets.len() - 1, "polygon")?;
        Ok(Self {
            coords,
            polygon_offsets,
            ring_offsets,
            dim,
        })
    }

    pub fn from_polygons<P, R, C>(dim: Dimension, polygons: &[P]) -> Result<Self>
    where
        P: AsRef<[R]>,
        R: AsRef<[C]>,
        C: AsRef<[f64]>,
    {
        let mut coords = vec![];
        let mut polygon_offsets = vec![0];
        let mut ring_offsets = vec![0];
        for polygon in polygons {
            for ring in polygon.as_ref() {
                coords.extend(flatten_coords(dim, ring.as_ref())?);
                ring_offsets.push(coords.len() / dim.size());
            }
            polygon_offsets.push(ring_offsets.len() - 1);
        }
        Ok(Self {
            coords,
            polygon_offsets,
            ring_offsets,
            dim,
        })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            polygon_offsets: vec![0],
            ring_offsets: vec![0],
            dim,
        }
    }

    pub fn num_polygons(&self) -> usize {
        self.polygon_offsets.len() - 1
    }

    pub fn polygon(&self, i: usize) -> Option<PolygonRef<'_>> {
        if i >= self.num_polygons() {
            return None;
        }
        let start = self.polygon_offsets[i];
        let end = self.polygon_offsets[i + 1];
        Some(PolygonRef::new(
            &self.coords,
            &self.ring_offsets[start..=end],
            self.dim,
        ))
    }

    pub fn polygons(&self) -> impl Iterator<Item = PolygonRef<'_>> {
        (0..self.num_polygons()).filter_map(|i| self.polygon(i))
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

    pub fn polygon_offsets(&self) -> &[usize] {
        &self.polygon_offsets
    }

    pub fn ring_offsets(&self) -> &[usize] {
        &self.ring_offsets
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

impl From<Vec<Vec<Vec<[f64; 2]>>>> for MultiPolygon {
    fn from(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
        let mut coords = vec![];
        let mut polygon_offsets = vec![0];
        let mut ring_offsets = vec![0];
        for polygon in value {
            for ring in polygon {
                coords.extend(ring.into_iter().flatten());
                ring_offsets.push(coords.len() / 2);
            }
            polygon_offsets.push(ring_offsets.len() - 1);
        }
        Self {
            coords,
            polygon_offsets,
            ring_offsets,
            dim: Dimension::XY,
        }
    }
}

impl From<Vec<Vec<Vec<[f64; 3]>>>> for MultiPolygon {
    fn from(value: Vec<Vec<Vec<[f64; 3]>>>) -> Self {
        let mut coords = vec![];
        let mut polygon_offsets = vec![0];
        let mut ring_offsets = vec![0];
        for polygon in value {
            for ring in polygon {
                coords.extend(ring.into_iter().flatten());
                ring_offsets.push(coords.len() / 3);
            }
            polygon_offsets.push(ring_offsets.len() - 1);
        }
        Self {
            coords,
            polygon_offsets,
            ring_offsets,
            dim: Dimension::XYZ,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoError;
    use crate::test::multipolygon::mpoly0;

    #[test]
    fn polygons_borrow_parent_buffer() {
        let multi_polygon = mpoly0();
        assert_eq!(multi_polygon.num_polygons(), 2);
        assert_eq!(multi_polygon.polygon_offsets(), &[0, 2, 3]);

        let first = multi_polygon.polygon(0).unwrap();
        assert_eq!(first.num_rings(), 2);
        assert_eq!(first.ring(1).unwrap().coord(0).unwrap().x(), 1.);

        let second = multi_polygon.polygon(1).unwrap();
        assert_eq!(second.num_rings(), 1);
        assert_eq!(second.exterior().unwrap().coord(0).unwrap().x(), -1.);
        assert!(multi_polygon.polygon(2).is_none());
    }

    #[test]
    fn polygon_offsets_are_checked() {
        assert!(matches!(
            MultiPolygon::try_new(Dimension::XY, vec![], vec![0, 2], vec![0]),
            Err(GeoError::StructuralViolation(_))
        ));
    }
}
