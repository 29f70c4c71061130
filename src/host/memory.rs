//! In-memory reference host
//!
//! A minimal [`MapApi`]/[`MapView`] implementation for tests, demos and
//! headless embeddings. Real deployments adapt their viewer instead.

use crate::core::geo::CoordinatePair;
use crate::host::{MapApi, MapView, SharedLayer, SharedMap, SharedView};
use std::sync::{Arc, Mutex};

pub struct MemoryView {
    center: CoordinatePair,
    zoom: f64,
    projection: Option<String>,
}

impl MemoryView {
    pub fn new(projection: impl Into<String>) -> Self {
        Self {
            center: CoordinatePair::default(),
            zoom: 0.0,
            projection: Some(projection.into()),
        }
    }
}

impl MapView for MemoryView {
    fn center(&self) -> CoordinatePair {
        self.center
    }

    fn set_center(&mut self, center: CoordinatePair) {
        self.center = center;
    }

    fn projection(&self) -> Option<String> {
        self.projection.clone()
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}

pub struct MemoryMap {
    view: Option<SharedView>,
    layers: Vec<SharedLayer>,
}

impl MemoryMap {
    /// A map whose view runs in the given reference system
    pub fn new(view_projection: impl Into<String>) -> Self {
        Self {
            view: Some(Arc::new(Mutex::new(MemoryView::new(view_projection)))),
            layers: Vec::new(),
        }
    }

    /// A map that exposes no view, for exercising degraded hosts
    pub fn without_view() -> Self {
        Self {
            view: None,
            layers: Vec::new(),
        }
    }

    pub fn shared(self) -> SharedMap {
        Arc::new(Mutex::new(self))
    }
}

impl MapApi for MemoryMap {
    fn view(&self) -> Option<SharedView> {
        self.view.clone()
    }

    fn layers(&self) -> Vec<SharedLayer> {
        self.layers.clone()
    }

    fn add_layer(&mut self, layer: SharedLayer) {
        self.layers.push(layer);
    }

    fn remove_layer(&mut self, layer: &SharedLayer) -> bool {
        let before = self.layers.len();
        self.layers.retain(|existing| !Arc::ptr_eq(existing, layer));
        self.layers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::marker::{MarkerLayer, MarkerStyle};

    #[test]
    fn test_layer_bookkeeping() {
        let mut map = MemoryMap::new("EPSG:3857");
        let layer: SharedLayer = Arc::new(Mutex::new(MarkerLayer::new(
            MarkerStyle::default(),
            "EPSG:3857",
        )));

        map.add_layer(layer.clone());
        assert_eq!(map.layers().len(), 1);

        assert!(map.remove_layer(&layer));
        assert!(map.layers().is_empty());
        assert!(!map.remove_layer(&layer));
    }

    #[test]
    fn test_view_state() {
        let map = MemoryMap::new("EPSG:3857");
        let view = map.view().unwrap();

        {
            let mut guard = view.lock().unwrap();
            guard.set_center(CoordinatePair::new(100.0, 200.0));
            guard.set_zoom(12.0);
        }

        let guard = view.lock().unwrap();
        assert_eq!(guard.center(), CoordinatePair::new(100.0, 200.0));
        assert_eq!(guard.zoom(), 12.0);
        assert_eq!(guard.projection().as_deref(), Some("EPSG:3857"));
    }
}
