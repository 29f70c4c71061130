//! Marker layer and point features
//!
//! The widget maintains a single vector layer of point markers. The layer is
//! handed to the host's layer collection, which owns it from then on; see
//! [`crate::layers::cache::LayerCache`] for the reuse rules.

use crate::host::LayerApi;
use crate::prelude::HashMap;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Collection name the layer is registered under
pub const MARKER_LAYER_NAME: &str = "coordinate-markers";
/// Human-facing layer title
pub const MARKER_LAYER_TITLE: &str = "Coordinate search";

/// Icon style for point markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Path to the icon image
    pub icon_path: String,
    /// Anchor within the icon as fractions of its size
    pub anchor: (f32, f32),
    pub scale: f32,
}

impl MarkerStyle {
    pub fn with_icon(path: impl Into<String>) -> Self {
        Self {
            icon_path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon_path: "img/marker.png".to_string(),
            // bottom-center, so the tip of a pin sits on the coordinate
            anchor: (0.5, 1.0),
            scale: 1.0,
        }
    }
}

/// A point feature with associated properties
#[derive(Debug, Clone)]
pub struct MarkerFeature {
    pub id: String,
    /// Geometry in the layer's reference system
    pub geometry: Point<f64>,
    pub properties: HashMap<String, serde_json::Value>,
}

impl MarkerFeature {
    pub fn new(id: impl Into<String>, geometry: Point<f64>) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties: HashMap::default(),
        }
    }

    /// Add a property to this feature
    pub fn with_property<V: Into<serde_json::Value>>(mut self, key: &str, value: V) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}

/// Vector layer holding the placed markers
pub struct MarkerLayer {
    name: String,
    title: String,
    style: MarkerStyle,
    crs: String,
    queryable: bool,
    features: Vec<MarkerFeature>,
}

impl MarkerLayer {
    /// Creates the layer with its fixed name and title; `crs` is the
    /// reference system all feature geometry is expressed in
    pub fn new(style: MarkerStyle, crs: impl Into<String>) -> Self {
        Self {
            name: MARKER_LAYER_NAME.to_string(),
            title: MARKER_LAYER_TITLE.to_string(),
            style,
            crs: crs.into(),
            queryable: true,
            features: Vec::new(),
        }
    }

    pub fn add_feature(&mut self, feature: MarkerFeature) {
        self.features.push(feature);
    }

    pub fn features(&self) -> &[MarkerFeature] {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn clear_features(&mut self) {
        self.features.clear();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn crs(&self) -> &str {
        &self.crs
    }
}

impl LayerApi for MarkerLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "title": self.title,
            "queryable": self.queryable,
            "crs": self.crs,
            "feature_count": self.features.len(),
            "icon": self.style.icon_path,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_creation() {
        let layer = MarkerLayer::new(MarkerStyle::default(), "EPSG:3857");
        assert_eq!(layer.name(), MARKER_LAYER_NAME);
        assert_eq!(layer.title(), MARKER_LAYER_TITLE);
        assert_eq!(layer.crs(), "EPSG:3857");
        assert_eq!(layer.feature_count(), 0);
    }

    #[test]
    fn test_feature_operations() {
        let mut layer = MarkerLayer::new(MarkerStyle::default(), "EPSG:3857");

        let feature = MarkerFeature::new("coordinate-1", Point::new(100.0, 200.0))
            .with_property("label", "1\nharbor");
        layer.add_feature(feature);

        assert_eq!(layer.feature_count(), 1);
        let stored = &layer.features()[0];
        assert_eq!(stored.id, "coordinate-1");
        assert_eq!(
            stored.property("label").and_then(|v| v.as_str()),
            Some("1\nharbor")
        );

        layer.clear_features();
        assert_eq!(layer.feature_count(), 0);
    }

    #[test]
    fn test_options_snapshot() {
        let layer = MarkerLayer::new(MarkerStyle::with_icon("img/pin.png"), "EPSG:3857");
        let options = layer.options();
        assert_eq!(options["name"], MARKER_LAYER_NAME);
        assert_eq!(options["queryable"], true);
        assert_eq!(options["icon"], "img/pin.png");
    }
}
