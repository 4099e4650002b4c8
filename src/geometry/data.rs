use crate::algorithm::native::BoundingBox;
use crate::datatypes::GeometryType;
use crate::error::{GeoError, Result};
use crate::geometry::{Geometry, GeometryCollection};

/// The transport form of a geometry used at the GeoJSON boundary.
///
/// Carries the `"type"` member verbatim, an optional bounding box and EPSG code, and either the
/// coordinates of a simple geometry or the member list of a collection. A type tag that is not
/// one of the seven known kinds is kept with neither, and [`GeometryData::into_geometry`]
/// rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    type_name: String,
    pub bbox: Option<BoundingBox>,
    pub epsg: Option<i32>,
    coordinates: Option<Geometry>,
    geometries: Vec<GeometryData>,
}

impl GeometryData {
    /// A geometry object whose `"type"` is not a known kind.
    pub fn unknown(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            bbox: None,
            epsg: None,
            coordinates: None,
            geometries: vec![],
        }
    }

    /// A `GeometryCollection` built from already-decoded members.
    pub fn collection(geometries: Vec<GeometryData>) -> Self {
        Self {
            type_name: GeometryType::GeometryCollection.name().to_string(),
            bbox: None,
            epsg: None,
            coordinates: None,
            geometries,
        }
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_epsg(mut self, epsg: i32) -> Self {
        self.epsg = Some(epsg);
        self
    }

    /// The `"type"` member as it appeared on input.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The kind, or `None` for an unrecognized type tag.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        GeometryType::from_name(&self.type_name)
    }

    pub fn is_collection(&self) -> bool {
        self.geometry_type() == Some(GeometryType::GeometryCollection)
    }

    /// The coordinates of a non-collection geometry.
    pub fn coordinates(&self) -> Option<&Geometry> {
        self.coordinates.as_ref()
    }

    /// The members of a collection.
    pub fn geometries(&self) -> &[GeometryData] {
        &self.geometries
    }

    pub fn is_empty(&self) -> bool {
        match &self.coordinates {
            Some(geometry) => geometry.is_empty(),
            None => self.geometries.iter().all(|g| g.is_empty()),
        }
    }

    pub fn to_geometry(&self) -> Result<Geometry> {
        self.clone().into_geometry()
    }

    pub fn into_geometry(self) -> Result<Geometry> {
        match self.geometry_type() {
            Some(GeometryType::GeometryCollection) => {
                let members = self
                    .geometries
                    .into_iter()
                    .map(|g| g.into_geometry())
                    .collect::<Result<Vec<_>>>()?;
                Ok(Geometry::GeometryCollection(GeometryCollection::new(
                    members,
                )))
            }
            Some(kind) => self.coordinates.ok_or_else(|| {
                GeoError::StructuralViolation(format!("{kind} geometry has no coordinates"))
            }),
            None => Err(GeoError::UnsupportedVariant(format!(
                "unknown geometry type {:?}",
                self.type_name
            ))),
        }
    }

    pub(crate) fn coordinates_mut(&mut self) -> Option<&mut Geometry> {
        self.coordinates.as_mut()
    }

    pub(crate) fn geometries_mut(&mut self) -> &mut [GeometryData] {
        &mut self.geometries
    }
}

impl From<Geometry> for GeometryData {
    fn from(value: Geometry) -> Self {
        match value {
            Geometry::GeometryCollection(collection) => Self::collection(
                collection
                    .into_inner()
                    .into_iter()
                    .map(GeometryData::from)
                    .collect(),
            ),
            geometry => Self {
                type_name: geometry.geometry_type().name().to_string(),
                bbox: None,
                epsg: None,
                coordinates: Some(geometry),
                geometries: vec![],
            },
        }
    }
}

impl TryFrom<GeometryData> for Geometry {
    type Error = GeoError;

    fn try_from(value: GeometryData) -> Result<Self> {
        value.into_geometry()
    }
}
