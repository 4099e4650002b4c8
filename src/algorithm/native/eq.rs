//! Structural equality with a per-axis tolerance.
//!
//! Multi points compare as sets, line strings and polygon rings compare independent of their
//! starting vertex, and polygon rings and multi polygon members compare independent of order.
//! Rings are sorted together, so a polygon's exterior ring is not distinguished from its holes.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::algorithm::native::bounding_box::{BoundingBox, BoundingBoxBuilder};
use crate::geometry::{
    Coord, Geometry, GeometryCollection, GeometryData, LineStringRef, MultiLineString,
    MultiPoint, MultiPolygon, Point, PolygonRef,
};

/// Maximum absolute difference between two equal coordinate values.
pub const TOLERANCE: f64 = 1e-6;

fn value_eq(left: f64, right: f64) -> bool {
    left == right || (left - right).abs() <= TOLERANCE
}

/// Lexicographic order by (x, y).
fn xy_cmp(left: &Coord<'_>, right: &Coord<'_>) -> Ordering {
    left.x()
        .total_cmp(&right.x())
        .then_with(|| left.y().total_cmp(&right.y()))
}

pub fn coord_eq(left: Coord<'_>, right: Coord<'_>) -> bool {
    left.dim() == right.dim()
        && left
            .as_slice()
            .iter()
            .zip(right.as_slice())
            .all(|(l, r)| value_eq(*l, *r))
}

pub fn point_eq(left: &Point, right: &Point) -> bool {
    if left.dim() != right.dim() {
        return false;
    }
    match (left.coord(), right.coord()) {
        (Some(l), Some(r)) => coord_eq(l, r),
        (None, None) => true,
        _ => false,
    }
}

/// The positions of `line`, rotated to start at the smallest one.
///
/// A closed ring is rotated without its closing position, which is then re-added after the new
/// first position.
fn rotated(line: LineStringRef<'_>) -> Vec<Coord<'_>> {
    let closed = line.num_coords() > 1 && line.is_closed();
    let mut coords = line.coords().collect_vec();
    if closed {
        coords.pop();
    }
    if let Some((min_idx, _)) = coords.iter().enumerate().min_by(|a, b| xy_cmp(a.1, b.1)) {
        coords.rotate_left(min_idx);
    }
    if closed {
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
    }
    coords
}

fn smallest_coord(line: LineStringRef<'_>) -> Option<Coord<'_>> {
    line.coords().min_by(xy_cmp)
}

/// Order rings by length, then by their smallest position.
fn ring_cmp(left: &LineStringRef<'_>, right: &LineStringRef<'_>) -> Ordering {
    left.num_coords()
        .cmp(&right.num_coords())
        .then_with(|| match (smallest_coord(*left), smallest_coord(*right)) {
            (Some(l), Some(r)) => xy_cmp(&l, &r),
            _ => Ordering::Equal,
        })
}

pub fn line_string_eq(left: LineStringRef<'_>, right: LineStringRef<'_>) -> bool {
    if left.dim() != right.dim() || left.num_coords() != right.num_coords() {
        return false;
    }
    rotated(left)
        .into_iter()
        .zip(rotated(right))
        .all(|(l, r)| coord_eq(l, r))
}

fn bounding_box_eq(left: Option<BoundingBox>, right: Option<BoundingBox>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l
            .min
            .iter()
            .chain(&l.max)
            .zip(r.min.iter().chain(&r.max))
            .all(|(a, b)| value_eq(*a, *b)),
        (None, None) => true,
        _ => false,
    }
}

pub fn polygon_eq(left: PolygonRef<'_>, right: PolygonRef<'_>) -> bool {
    if left.dim() != right.dim() || left.num_rings() != right.num_rings() {
        return false;
    }

    let extent = |polygon: PolygonRef<'_>| {
        let mut builder = BoundingBoxBuilder::new();
        builder.add_polygon(polygon);
        builder.finish()
    };
    if !bounding_box_eq(extent(left), extent(right)) {
        return false;
    }

    left.rings()
        .sorted_by(ring_cmp)
        .zip(right.rings().sorted_by(ring_cmp))
        .all(|(l, r)| line_string_eq(l, r))
}

pub fn multi_point_eq(left: &MultiPoint, right: &MultiPoint) -> bool {
    if left.dim() != right.dim() || left.num_points() != right.num_points() {
        return false;
    }
    left.points()
        .sorted_by(xy_cmp)
        .zip(right.points().sorted_by(xy_cmp))
        .all(|(l, r)| coord_eq(l, r))
}

/// Every line on either side has an equal line on the other side.
pub fn multi_line_string_eq(left: &MultiLineString, right: &MultiLineString) -> bool {
    if left.dim() != right.dim() || left.num_lines() != right.num_lines() {
        return false;
    }
    let covered = |from: &MultiLineString, to: &MultiLineString| {
        from.lines()
            .all(|line| to.lines().any(|other| line_string_eq(line, other)))
    };
    covered(left, right) && covered(right, left)
}

fn exterior_cmp(left: &PolygonRef<'_>, right: &PolygonRef<'_>) -> Ordering {
    match (left.exterior(), right.exterior()) {
        (Some(l), Some(r)) => ring_cmp(&l, &r),
        (l, r) => l.is_some().cmp(&r.is_some()),
    }
}

pub fn multi_polygon_eq(left: &MultiPolygon, right: &MultiPolygon) -> bool {
    if left.dim() != right.dim() || left.num_polygons() != right.num_polygons() {
        return false;
    }
    left.polygons()
        .sorted_by(exterior_cmp)
        .zip(right.polygons().sorted_by(exterior_cmp))
        .all(|(l, r)| polygon_eq(l, r))
}

pub fn geometry_collection_eq(left: &GeometryCollection, right: &GeometryCollection) -> bool {
    left.num_geometries() == right.num_geometries()
        && left.iter().zip(right).all(|(l, r)| geometry_eq(l, r))
}

pub fn geometry_eq(left: &Geometry, right: &Geometry) -> bool {
    match (left, right) {
        (Geometry::Point(l), Geometry::Point(r)) => point_eq(l, r),
        (Geometry::LineString(l), Geometry::LineString(r)) => {
            line_string_eq(l.as_view(), r.as_view())
        }
        (Geometry::Polygon(l), Geometry::Polygon(r)) => polygon_eq(l.as_view(), r.as_view()),
        (Geometry::MultiPoint(l), Geometry::MultiPoint(r)) => multi_point_eq(l, r),
        (Geometry::MultiLineString(l), Geometry::MultiLineString(r)) => {
            multi_line_string_eq(l, r)
        }
        (Geometry::MultiPolygon(l), Geometry::MultiPolygon(r)) => multi_polygon_eq(l, r),
        (Geometry::GeometryCollection(l), Geometry::GeometryCollection(r)) => {
            geometry_collection_eq(l, r)
        }
        _ => false,
    }
}

/// Compare two optional geometries. Two absent geometries are equal.
pub fn equals_structural(left: Option<&Geometry>, right: Option<&Geometry>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => geometry_eq(l, r),
        (None, None) => true,
        _ => false,
    }
}

/// Compare transport forms: same type tag and structurally equal contents.
///
/// Bounding boxes and EPSG codes are not compared.
pub fn geometry_data_eq(left: &GeometryData, right: &GeometryData) -> bool {
    left.type_name() == right.type_name()
        && equals_structural(left.coordinates(), right.coordinates())
        && left.geometries().len() == right.geometries().len()
        && left
            .geometries()
            .iter()
            .zip(right.geometries())
            .all(|(l, r)| geometry_data_eq(l, r))
}
