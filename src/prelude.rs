//! Prelude module for common pinpoint types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pinpoint::prelude::*;`

pub use crate::core::{
    config::{FinderConfig, LogLevel, SecondaryReadout},
    crs::{CrsRegistry, SECONDARY_CRS, SWEREF99_TM, WEB_MERCATOR, WGS84},
    dms::{DmsAngle, Hemisphere},
    geo::{format_ordinate, CoordinatePair},
};

pub use crate::finder::{CoordinateFinder, CoordinateInput, PlacementOutcome};

pub use crate::host::{
    memory::{MemoryMap, MemoryView},
    HostBindings, LayerApi, MapAccess, MapApi, MapView, SharedLayer, SharedMap, SharedView,
};

pub use crate::layers::{
    cache::LayerCache,
    marker::{MarkerFeature, MarkerLayer, MarkerStyle, MARKER_LAYER_NAME, MARKER_LAYER_TITLE},
};

pub use crate::transform::{
    providers::{EpsgTransform, HostTransform, RegisteredDefs},
    HostTransformFn, TransformChain, TransformProvider,
};

pub use crate::ui::{
    component::{
        AttachTarget, ButtonSpec, Component, ComponentId, Disposers, TooltipPlacement, UiHost,
    },
    panel::{CoordinatePanel, DmsFieldGroup, PanelEvent, PanelView},
};

pub use crate::{FinderError, Result};

pub use std::sync::{Arc, Mutex, Weak};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
