use crate::geometry::{
    Coord, Geometry, GeometryCollection, GeometryData, LineString, LineStringRef,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, PolygonRef,
};

/// An axis-aligned 3D bounding box given by its two corners.
///
/// Boxes of 2D geometries have `min[2] == max[2] == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    pub fn new_2d(min: [f64; 2], max: [f64; 2]) -> Self {
        Self {
            min: [min[0], min[1], 0.],
            max: [max[0], max[1], 0.],
        }
    }

    /// Componentwise min of the min corners and max of the max corners.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    /// Grow the box to cover `point`.
    pub fn expand(&mut self, point: [f64; 3]) {
        for (i, value) in point.into_iter().enumerate() {
            self.min[i] = self.min[i].min(value);
            self.max[i] = self.max[i].max(value);
        }
    }

    pub fn contains_point(&self, point: [f64; 3]) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Whether the z range is the `(0, 0)` of a 2D geometry.
    pub fn is_2d(&self) -> bool {
        self.min[2] == 0. && self.max[2] == 0.
    }
}

/// Merge a list of boxes; `None` for an empty list.
pub fn merge_bounding_boxes<'a>(
    boxes: impl IntoIterator<Item = &'a BoundingBox>,
) -> Option<BoundingBox> {
    boxes
        .into_iter()
        .fold(None, |acc: Option<BoundingBox>, bbox| match acc {
            Some(acc) => Some(acc.merge(bbox)),
            None => Some(*bbox),
        })
}

/// Accumulates coordinates into a bounding box.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBoxBuilder {
    min: [f64; 3],
    max: [f64; 3],
}

impl BoundingBoxBuilder {
    pub fn new() -> Self {
        BoundingBoxBuilder {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    pub fn add_coord(&mut self, coord: Coord<'_>) {
        let values = [coord.x(), coord.y(), coord.z().unwrap_or(0.)];
        for (i, value) in values.into_iter().enumerate() {
            if value < self.min[i] {
                self.min[i] = value;
            }
            if value > self.max[i] {
                self.max[i] = value;
            }
        }
    }

    pub fn add_point(&mut self, geom: &Point) {
        if let Some(coord) = geom.coord() {
            self.add_coord(coord);
        }
    }

    pub fn add_line_string(&mut self, geom: LineStringRef<'_>) {
        for coord in geom.coords() {
            self.add_coord(coord);
        }
    }

    pub fn add_polygon(&mut self, geom: PolygonRef<'_>) {
        for ring in geom.rings() {
            self.add_line_string(ring);
        }
    }

    pub fn add_multi_point(&mut self, geom: &MultiPoint) {
        for coord in geom.points() {
            self.add_coord(coord);
        }
    }

    pub fn add_multi_line_string(&mut self, geom: &MultiLineString) {
        for line in geom.lines() {
            self.add_line_string(line);
        }
    }

    pub fn add_multi_polygon(&mut self, geom: &MultiPolygon) {
        for polygon in geom.polygons() {
            self.add_polygon(polygon);
        }
    }

    pub fn add_geometry_collection(&mut self, geom: &GeometryCollection) {
        for member in geom {
            self.add_geometry(member);
        }
    }

    pub fn add_geometry(&mut self, geom: &Geometry) {
        match geom {
            Geometry::Point(g) => self.add_point(g),
            Geometry::LineString(g) => self.add_line_string(g.as_view()),
            Geometry::Polygon(g) => self.add_polygon(g.as_view()),
            Geometry::MultiPoint(g) => self.add_multi_point(g),
            Geometry::MultiLineString(g) => self.add_multi_line_string(g),
            Geometry::MultiPolygon(g) => self.add_multi_polygon(g),
            Geometry::GeometryCollection(g) => self.add_geometry_collection(g),
        }
    }

    pub fn add_geometry_data(&mut self, geom: &GeometryData) {
        if let Some(coordinates) = geom.coordinates() {
            self.add_geometry(coordinates);
        }
        for member in geom.geometries() {
            self.add_geometry_data(member);
        }
    }

    pub fn add_bounding_box(&mut self, bbox: &BoundingBox) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(bbox.min[i]);
            self.max[i] = self.max[i].max(bbox.max[i]);
        }
    }

    /// The accumulated box, or `None` if no coordinate was added.
    pub fn finish(self) -> Option<BoundingBox> {
        (self.min[0] <= self.max[0]).then_some(BoundingBox {
            min: self.min,
            max: self.max,
        })
    }
}

impl Default for BoundingBoxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the bounding box of a geometry. Empty geometries have none.
pub trait ComputeBounds {
    fn bounding_box(&self) -> Option<BoundingBox>;
}

macro_rules! impl_compute_bounds {
    ($type:ty, |$builder:ident, $geom:ident| $body:expr) => {
        impl ComputeBounds for $type {
            fn bounding_box(&self) -> Option<BoundingBox> {
                let mut $builder = BoundingBoxBuilder::new();
                let $geom = self;
                $body;
                $builder.finish()
            }
        }
    };
}

impl_compute_bounds!(Point, |b, g| b.add_point(g));
impl_compute_bounds!(LineString, |b, g| b.add_line_string(g.as_view()));
impl_compute_bounds!(Polygon, |b, g| b.add_polygon(g.as_view()));
impl_compute_bounds!(MultiPoint, |b, g| b.add_multi_point(g));
impl_compute_bounds!(MultiLineString, |b, g| b.add_multi_line_string(g));
impl_compute_bounds!(MultiPolygon, |b, g| b.add_multi_polygon(g));
impl_compute_bounds!(GeometryCollection, |b, g| b.add_geometry_collection(g));
impl_compute_bounds!(Geometry, |b, g| b.add_geometry(g));
impl_compute_bounds!(GeometryData, |b, g| b.add_geometry_data(g));

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::datatypes::Dimension;
    use crate::test::{geometrycollection::gc0, multipolygon::mpoly_z, polygon::poly1};

    #[test]
    fn multi_point_bounds() {
        let multi_point: MultiPoint = vec![[1., 2.], [3., 4.], [5., 1.]].into();
        let bbox = multi_point.bounding_box().unwrap();
        assert_eq!(bbox, BoundingBox::new([1., 1., 0.], [5., 4., 0.]));
        assert!(bbox.is_2d());
    }

    #[test]
    fn single_point_bounds() {
        let bbox = Point::new(1., 2.).bounding_box().unwrap();
        assert_eq!(bbox.min, [1., 2., 0.]);
        assert_eq!(bbox.max, [1., 2., 0.]);
    }

    #[test]
    fn three_dimensional_bounds() {
        let line: LineString = vec![[0.5, 1., -3.], [2., -1., 7.25]].into();
        let bbox = line.bounding_box().unwrap();
        assert_relative_eq!(bbox.min[2], -3.);
        assert_relative_eq!(bbox.max[2], 7.25);
        assert!(!bbox.is_2d());

        let bbox = mpoly_z().bounding_box().unwrap();
        assert_eq!(bbox, BoundingBox::new([-2., -2., 0.], [4., 4., 0.]));
    }

    #[test]
    fn collection_merges_members() {
        let bbox = gc0().bounding_box().unwrap();
        assert_eq!(bbox, BoundingBox::new_2d([4., 6.], [7., 10.]));
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        assert!(Point::empty(Dimension::XY).bounding_box().is_none());
        assert!(Polygon::empty(Dimension::XYZ).bounding_box().is_none());
        assert!(GeometryCollection::new(vec![]).bounding_box().is_none());
        assert!(GeometryData::unknown("Circle").bounding_box().is_none());
    }

    #[test]
    fn every_coordinate_is_contained() {
        let polygon = poly1();
        let bbox = polygon.bounding_box().unwrap();
        for ring in polygon.rings() {
            for coord in ring.coords() {
                assert!(bbox.contains_point([coord.x(), coord.y(), 0.]));
            }
        }
    }

    #[test]
    fn merge_laws() {
        let a = BoundingBox::new([0., 0., 0.], [1., 1., 1.]);
        let b = BoundingBox::new([-1., 0.5, 0.], [0.5, 3., 0.]);
        let c = BoundingBox::new_2d([2., -4.], [3., -3.]);

        assert_eq!(a.merge(&a), a);
        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
        assert!(a.merge(&b).contains(&a));
        assert_eq!(merge_bounding_boxes([&a, &b, &c]), Some(a.merge(&b).merge(&c)));
        assert_eq!(merge_bounding_boxes(std::iter::empty()), None);
    }

    #[test]
    fn expand() {
        let mut bbox = BoundingBox::new_2d([0., 0.], [1., 1.]);
        bbox.expand([2., -1., 5.]);
        assert_eq!(bbox, BoundingBox::new([0., -1., 0.], [2., 1., 5.]));
    }
}
