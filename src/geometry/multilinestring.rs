use crate::datatypes::Dimension;
use crate::error::Result;
use crate::geometry::{check_offsets, check_stride, flatten_coords, LineStringRef};

/// A sequence of line strings sharing one flat coordinate buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    coords: Vec<f64>,
    /// Position offsets where each line starts, plus a trailing end offset.
    line_offsets: Vec<usize>,
    dim: Dimension,
}

impl MultiLineString {
    pub fn try_new(dim: Dimension, coords: Vec<f64>, line_offsets: Vec<usize>) -> Result<Self> {
        check_stride(&coords, dim)?;
        check_offsets(&line_offsets, coords.len() / dim.size(), "line")?;
        Ok(Self {
            coords,
            line_offsets,
            dim,
        })
    }

    pub fn from_lines<L, C>(dim: Dimension, lines: &[L]) -> Result<Self>
    where
        L: AsRef<[C]>,
        C: AsRef<[f64]>,
    {
        let mut coords = vec![];
        let mut line_offsets = Vec::with_capacity(lines.len() + 1);
        line_offsets.push(0);
        for line in lines {
            coords.extend(flatten_coords(dim, line.as_ref())?);
            line_offsets.push(coords.len() / dim.size());
        }
        Ok(Self {
            coords,
            line_offsets,
            dim,
        })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            line_offsets: vec![0],
            dim,
        }
    }

    pub fn num_lines(&self) -> usize {
        self.line_offsets.len() - 1
    }

    pub fn line(&self, i: usize) -> Option<LineStringRef<'_>> {
        if i >= self.num_lines() {
            return None;
        }
        let stride = self.dim.size();
        let start = self.line_offsets[i] * stride;
        let end = self.line_offsets[i + 1] * stride;
        Some(LineStringRef::new(&self.coords[start..end], self.dim))
    }

    pub fn lines(&self) -> impl Iterator<Item = LineStringRef<'_>> {
        (0..self.num_lines()).filter_map(|i| self.line(i))
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

    pub fn line_offsets(&self) -> &[usize] {
        &self.line_offsets
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }
}

impl From<Vec<Vec<[f64; 2]>>> for MultiLineString {
    fn from(value: Vec<Vec<[f64; 2]>>) -> Self {
        let mut coords = vec![];
        let mut line_offsets = vec![0];
        for line in value {
            coords.extend(line.into_iter().flatten());
            line_offsets.push(coords.len() / 2);
        }
        Self {
            coords,
            line_offsets,
            dim: Dimension::XY,
        }
    }
}

impl From<Vec<Vec<[f64; 3]>>> for MultiLineString {
    fn from(value: Vec<Vec<[f64; 3]>>) -> Self {
        let mut coords = vec![];
        let mut line_offsets = vec![0];
        for line in value {
            coords.extend(line.into_iter().flatten());
            line_offsets.push(coords.len() / 3);
        }
        Self {
            coords,
            line_offsets,
            dim: Dimension::XYZ,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::multilinestring::ml0;

    #[test]
    fn lines() {
        let multi_line = ml0();
        assert_eq!(multi_line.num_lines(), 2);
        assert_eq!(multi_line.line_offsets(), &[0, 2, 4]);
        assert_eq!(multi_line.line(1).unwrap().coord(0).unwrap().x(), 3.);
        assert!(multi_line.line(2).is_none());
        assert_eq!(multi_line.lines().map(|l| l.num_coords()).sum::<usize>(), 4);
    }
}
