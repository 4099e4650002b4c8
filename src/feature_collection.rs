use crate::algorithm::native::{BoundingBox, BoundingBoxBuilder, ComputeBounds};
use crate::feature::{Feature, JsonObject};

/// An ordered list of features.
///
/// `properties` is not part of RFC 7946 but is read and written when present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub bbox: Option<BoundingBox>,
    pub features: Vec<Feature>,
    pub crs: Option<JsonObject>,
    pub properties: Option<JsonObject>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feature(&mut self, feature: Feature) -> &mut Self {
        self.features.push(feature);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Recompute the collection bounding box from its features.
    pub fn update_bbox(&mut self) {
        self.bbox = self.bounding_box();
    }
}

impl ComputeBounds for FeatureCollection {
    fn bounding_box(&self) -> Option<BoundingBox> {
        let mut builder = BoundingBoxBuilder::new();
        for feature in &self.features {
            if let Some(bbox) = feature.bbox.or_else(|| feature.bounding_box()) {
                builder.add_bounding_box(&bbox);
            }
        }
        builder.finish()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self {
            features: iter.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
