//! Contracts expected from the host map viewer
//!
//! The widget never owns a map. It talks to whatever the host hands it
//! through these traits, shared behind the usual `Arc<Mutex<...>>` handles so
//! the host's layer collection stays the owner and the widget can hold weak
//! references.

pub mod memory;

use crate::core::geo::CoordinatePair;
use crate::transform::HostTransformFn;
use std::any::Any;
use std::sync::{Arc, Mutex};

pub type SharedMap = Arc<Mutex<dyn MapApi>>;
pub type SharedView = Arc<Mutex<dyn MapView>>;
pub type SharedLayer = Arc<Mutex<dyn LayerApi>>;

/// A live map instance
pub trait MapApi: Send {
    /// The active view, when the host exposes one
    fn view(&self) -> Option<SharedView>;

    /// Snapshot of the current layer collection
    fn layers(&self) -> Vec<SharedLayer>;

    fn add_layer(&mut self, layer: SharedLayer);

    /// Removes a layer by handle identity; returns whether it was present
    fn remove_layer(&mut self, layer: &SharedLayer) -> bool;
}

/// The map's current viewport
pub trait MapView: Send {
    fn center(&self) -> CoordinatePair;

    fn set_center(&mut self, center: CoordinatePair);

    /// Code of the reference system the view operates in, when known
    fn projection(&self) -> Option<String>;

    fn set_zoom(&mut self, zoom: f64);

    fn zoom(&self) -> f64;
}

/// A layer as seen by the host's layer collection
pub trait LayerApi: Send {
    fn name(&self) -> &str;

    fn options(&self) -> serde_json::Value;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type MapProbe = Box<dyn Fn() -> Option<SharedMap> + Send + Sync>;

/// Ordered capability probes for obtaining the live map instance.
///
/// Host API surfaces differ between embeddings; rather than hard-coding one
/// accessor, the host registers however many it has and the first probe that
/// yields a handle wins.
#[derive(Default)]
pub struct MapAccess {
    probes: Vec<MapProbe>,
}

impl MapAccess {
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    pub fn with_probe(
        mut self,
        probe: impl Fn() -> Option<SharedMap> + Send + Sync + 'static,
    ) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    /// First handle any probe yields
    pub fn resolve(&self) -> Option<SharedMap> {
        self.probes.iter().find_map(|probe| probe())
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

/// Everything the host wires into the widget at construction time
#[derive(Default)]
pub struct HostBindings {
    pub map_access: MapAccess,
    /// The host's own coordinate-transform utility, tried ahead of the
    /// library-backed providers
    pub transform_utility: Option<HostTransformFn>,
}
