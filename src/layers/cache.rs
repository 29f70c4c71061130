//! Session-scoped marker layer cache
//!
//! At most one marker layer exists per session. The host's layer collection
//! owns it; the cache keeps a weak handle and must confirm the layer is
//! still attached before reusing it, since the host may have removed it
//! behind the widget's back.

use crate::host::{MapApi, SharedLayer};
use crate::layers::marker::{MarkerLayer, MarkerStyle, MARKER_LAYER_NAME};
use std::sync::{Arc, Mutex, Weak};

#[derive(Default)]
pub struct LayerCache {
    handle: Option<Weak<Mutex<MarkerLayer>>>,
}

impl LayerCache {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// The cached layer, iff it is still attached to the map
    fn attached(&self, map: &dyn MapApi) -> Option<Arc<Mutex<MarkerLayer>>> {
        let layer = self.handle.as_ref()?.upgrade()?;
        let as_dyn: SharedLayer = layer.clone();
        map.layers()
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &as_dyn))
            .then_some(layer)
    }

    /// Reuses the cached layer or creates and attaches a fresh one
    pub fn get_or_create(
        &mut self,
        map: &mut dyn MapApi,
        style: &MarkerStyle,
        crs: &str,
    ) -> Arc<Mutex<MarkerLayer>> {
        if let Some(layer) = self.attached(map) {
            return layer;
        }
        let layer = Arc::new(Mutex::new(MarkerLayer::new(style.clone(), crs)));
        map.add_layer(layer.clone());
        self.handle = Some(Arc::downgrade(&layer));
        layer
    }

    /// Clears and detaches the marker layer, locating it by cached handle or
    /// by its fixed name. Returns whether a layer was found.
    pub fn clear(&mut self, map: &mut dyn MapApi) -> bool {
        let cached: Option<SharedLayer> = self
            .handle
            .take()
            .and_then(|weak| weak.upgrade())
            .map(|layer| -> SharedLayer { layer });

        let found = map.layers().into_iter().find(|layer| {
            if let Some(cached) = &cached {
                if Arc::ptr_eq(layer, cached) {
                    return true;
                }
            }
            layer
                .lock()
                .map(|guard| guard.name() == MARKER_LAYER_NAME)
                .unwrap_or(false)
        });

        match found {
            Some(layer) => {
                if let Ok(mut guard) = layer.lock() {
                    if let Some(markers) = guard.as_any_mut().downcast_mut::<MarkerLayer>() {
                        markers.clear_features();
                    }
                }
                map.remove_layer(&layer);
                true
            }
            None => false,
        }
    }

    /// Whether a live, attached layer is currently cached
    pub fn is_cached(&self, map: &dyn MapApi) -> bool {
        self.attached(map).is_some()
    }
}
