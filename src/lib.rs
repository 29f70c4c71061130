//! # Pinpoint
//!
//! A coordinate search widget for embeddable map viewers.
//!
//! The widget lets a user enter a coordinate pair (projected X/Y or
//! degrees-minutes-seconds), converts it between reference systems, drops a
//! marker on the host map and centers the view on it. Map rendering,
//! projection math and the UI toolkit stay on the host side: this crate
//! orchestrates calls into the contracts defined in [`host`] and [`ui`] and
//! delegates transform math to an ordered provider chain in [`transform`].

pub mod core;
pub mod finder;
pub mod host;
pub mod layers;
pub mod prelude;
pub mod transform;
pub mod ui;

mod macros;

// Re-export public API
pub use crate::core::{
    config::{FinderConfig, LogLevel, SecondaryReadout},
    crs::CrsRegistry,
    dms::{DmsAngle, Hemisphere},
    geo::CoordinatePair,
};

pub use finder::{CoordinateFinder, CoordinateInput, PlacementOutcome};

pub use host::{HostBindings, LayerApi, MapAccess, MapApi, MapView};

pub use layers::{
    cache::LayerCache,
    marker::{MarkerFeature, MarkerLayer, MarkerStyle},
};

pub use transform::{TransformChain, TransformProvider};

pub use ui::{
    component::{AttachTarget, ButtonSpec, Component, Disposers, UiHost},
    panel::{CoordinatePanel, PanelEvent},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = FinderError;
