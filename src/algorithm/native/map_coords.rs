use crate::algorithm::native::bounding_box::ComputeBounds;
use crate::error::{GeoError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, GeometryData, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

/// Apply a function to every coordinate tuple of a geometry, keeping its structure.
///
/// The function receives each tuple as a mutable slice of `dim.size()` values.
pub trait MapCoords: Clone {
    /// Visit every coordinate tuple in place, stopping at the first error.
    fn try_map_coords_in_place<F, E>(&mut self, map_op: &mut F) -> std::result::Result<(), E>
    where
        F: FnMut(&mut [f64]) -> std::result::Result<(), E>;

    fn map_coords<F>(&self, map_op: F) -> Self
    where
        F: Fn(&mut [f64]),
    {
        let mut output = self.clone();
        let result = output.try_map_coords_in_place(&mut |coord: &mut [f64]| {
            map_op(coord);
            Ok::<_, std::convert::Infallible>(())
        });
        match result {
            Ok(()) => output,
            Err(never) => match never {},
        }
    }

    fn try_map_coords<F, E>(&self, map_op: F) -> Result<Self>
    where
        F: Fn(&mut [f64]) -> std::result::Result<(), E>,
        GeoError: From<E>,
    {
        let mut output = self.clone();
        output.try_map_coords_in_place(&mut |coord: &mut [f64]| map_op(coord))?;
        Ok(output)
    }
}

fn map_values<F, E>(values: &mut [f64], stride: usize, map_op: &mut F) -> std::result::Result<(), E>
where
    F: FnMut(&mut [f64]) -> std::result::Result<(), E>,
{
    for coord in values.chunks_exact_mut(stride) {
        map_op(coord)?;
    }
    Ok(())
}

macro_rules! impl_flat {
    ($($type:ty),+) => {
        $(
            impl MapCoords for $type {
                fn try_map_coords_in_place<F, E>(
                    &mut self,
                    map_op: &mut F,
                ) -> std::result::Result<(), E>
                where
                    F: FnMut(&mut [f64]) -> std::result::Result<(), E>,
                {
                    let stride = self.dim().size();
                    map_values(self.values_mut(), stride, map_op)
                }
            }
        )+
    };
}

impl_flat!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon
);

impl MapCoords for GeometryCollection {
    fn try_map_coords_in_place<F, E>(&mut self, map_op: &mut F) -> std::result::Result<(), E>
    where
        F: FnMut(&mut [f64]) -> std::result::Result<(), E>,
    {
        for member in self.geometries_mut() {
            member.try_map_coords_in_place(map_op)?;
        }
        Ok(())
    }
}

impl MapCoords for Geometry {
    fn try_map_coords_in_place<F, E>(&mut self, map_op: &mut F) -> std::result::Result<(), E>
    where
        F: FnMut(&mut [f64]) -> std::result::Result<(), E>,
    {
        match self {
            Geometry::Point(g) => g.try_map_coords_in_place(map_op),
            Geometry::LineString(g) => g.try_map_coords_in_place(map_op),
            Geometry::Polygon(g) => g.try_map_coords_in_place(map_op),
            Geometry::MultiPoint(g) => g.try_map_coords_in_place(map_op),
            Geometry::MultiLineString(g) => g.try_map_coords_in_place(map_op),
            Geometry::MultiPolygon(g) => g.try_map_coords_in_place(map_op),
            Geometry::GeometryCollection(g) => g.try_map_coords_in_place(map_op),
        }
    }
}

/// A cached bounding box is recomputed after the coordinates change.
impl MapCoords for GeometryData {
    fn try_map_coords_in_place<F, E>(&mut self, map_op: &mut F) -> std::result::Result<(), E>
    where
        F: FnMut(&mut [f64]) -> std::result::Result<(), E>,
    {
        if let Some(coordinates) = self.coordinates_mut() {
            coordinates.try_map_coords_in_place(map_op)?;
        }
        for member in self.geometries_mut() {
            member.try_map_coords_in_place(map_op)?;
        }
        if self.bbox.is_some() {
            self.bbox = self.bounding_box();
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::native::bounding_box::BoundingBox;
    use crate::test::{geometrycollection::gc0, polygon::poly1, polygon::poly_z};

    #[test]
    fn translate_polygon() {
        let shifted = poly1().map_coords(|coord| {
            coord[0] += 10.;
            coord[1] -= 1.;
        });
        assert_eq!(shifted.num_rings(), 2);
        assert_eq!(shifted.ring_offsets(), poly1().ring_offsets());
        let first = shifted.exterior().unwrap().coord(0).unwrap();
        assert_eq!((first.x(), first.y()), (10., -1.));
    }

    #[test]
    fn z_values_are_visible() {
        let scaled = poly_z().map_coords(|coord| coord[2] *= 2.);
        assert_eq!(scaled.exterior().unwrap().coord(1).unwrap().z(), Some(12.));
    }

    #[test]
    fn collection_members_are_visited() {
        let geometry = Geometry::GeometryCollection(gc0());
        let mut count = 0;
        let mut cloned = geometry.clone();
        cloned
            .try_map_coords_in_place(&mut |_: &mut [f64]| {
                count += 1;
                Ok::<_, GeoError>(())
            })
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn errors_propagate() {
        let result = poly1().try_map_coords(|coord| {
            if coord[0] > 3. {
                Err(GeoError::StructuralViolation("out of range".to_string()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(GeoError::StructuralViolation(_))));
    }

    #[test]
    fn cached_bbox_follows_coordinates() {
        let data = GeometryData::from(Geometry::Point(Point::new(1., 2.)))
            .with_bbox(BoundingBox::new_2d([1., 2.], [1., 2.]));
        let moved = data.map_coords(|coord| coord[0] = 5.);
        assert_eq!(moved.bbox, Some(BoundingBox::new_2d([5., 2.], [5., 2.])));
    }
}
