use crate::datatypes::Dimension;
use crate::geometry::Geometry;

/// A heterogeneous, ordered collection of geometries. Nested collections are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    dim: Dimension,
}

impl GeometryCollection {
    /// Construct a collection whose dimension is taken from its first member.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        let dim = geometries.first().map(|g| g.dim()).unwrap_or_default();
        Self { geometries, dim }
    }

    /// Construct a collection with an explicit dimension, e.g. `GEOMETRYCOLLECTION Z EMPTY`.
    pub fn with_dim(geometries: Vec<Geometry>, dim: Dimension) -> Self {
        Self { geometries, dim }
    }

    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn geometry(&self, i: usize) -> Option<&Geometry> {
        self.geometries.get(i)
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        self.geometries.iter()
    }

    pub fn dim(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.iter().all(|g| g.is_empty())
    }

    pub fn into_inner(self) -> Vec<Geometry> {
        self.geometries
    }

    pub(crate) fn geometries_mut(&mut self) -> &mut [Geometry] {
        &mut self.geometries
    }
}

impl<'a> IntoIterator for &'a GeometryCollection {
    type Item = &'a Geometry;
    type IntoIter = std::slice::Iter<'a, Geometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Geometry>> for GeometryCollection {
    fn from(value: Vec<Geometry>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::geometrycollection::gc0;

    #[test]
    fn dimension_follows_first_member() {
        assert_eq!(gc0().dim(), Dimension::XY);
        assert_eq!(GeometryCollection::new(vec![]).dim(), Dimension::XY);
        let collection = GeometryCollection::with_dim(vec![], Dimension::XYZ);
        assert!(collection.is_empty());
        assert_eq!(collection.dim(), Dimension::XYZ);
    }

    #[test]
    fn members() {
        let collection = gc0();
        assert_eq!(collection.num_geometries(), 2);
        assert!(collection.geometry(2).is_none());
        assert_eq!((&collection).into_iter().count(), 2);
    }
}
