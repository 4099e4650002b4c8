use crate::datatypes::Dimension;

/// A borrowed coordinate tuple.
///
/// The slice always holds exactly `dim.size()` values, ordered x, y, then z and/or m.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord<'a> {
    values: &'a [f64],
    dim: Dimension,
}

impl<'a> Coord<'a> {
    pub(crate) fn new(values: &'a [f64], dim: Dimension) -> Self {
        debug_assert_eq!(values.len(), dim.size());
        Self { values, dim }
    }

    pub fn x(&self) -> f64 {
        self.values[0]
    }

    pub fn y(&self) -> f64 {
        self.values[1]
    }

    pub fn z(&self) -> Option<f64> {
        self.dim.z_index().map(|idx| self.values[idx])
    }

    pub fn m(&self) -> Option<f64> {
        match self.dim {
            Dimension::XYM => Some(self.values[2]),
            Dimension::XYZM => Some(self.values[3]),
            _ => None,
        }
    }

    /// Access the n'th (0-based) value of the tuple.
    pub fn nth(&self, n: usize) -> Option<f64> {
        self.values.get(n).copied()
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn as_slice(&self) -> &'a [f64] {
        self.values
    }
}

/// Iterate over a flat coordinate buffer in steps of `dim.size()`.
pub(crate) fn coord_iter(values: &[f64], dim: Dimension) -> impl Iterator<Item = Coord<'_>> {
    values
        .chunks_exact(dim.size())
        .map(move |chunk| Coord::new(chunk, dim))
}
