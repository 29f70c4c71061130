//! Widget configuration
//!
//! Everything the host can tune is read once at construction time. The
//! structs deserialize from the host application's JSON configuration and
//! every field has a sensible default so a bare `{}` is a valid config.

use crate::prelude::HashMap;
use log::Level;
use serde::{Deserialize, Serialize};

/// Minimum severity the widget will emit through the `log` facade.
///
/// `Silent` suppresses everything, including errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Info,
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// Whether a record at `level` passes this threshold
    pub fn permits(self, level: Level) -> bool {
        match self.ceiling() {
            Some(max) => level <= max,
            None => false,
        }
    }

    fn ceiling(self) -> Option<Level> {
        match self {
            LogLevel::Trace => Some(Level::Trace),
            LogLevel::Info => Some(Level::Info),
            LogLevel::Warn => Some(Level::Warn),
            LogLevel::Error => Some(Level::Error),
            LogLevel::Silent => None,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

/// What to render in the marker label when the secondary readout cannot be
/// produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryReadout {
    /// Emit an explicit "unavailable" line
    Placeholder,
    /// Leave the line out entirely
    Omit,
}

impl Default for SecondaryReadout {
    fn default() -> Self {
        SecondaryReadout::Placeholder
    }
}

/// Configuration for the coordinate finder widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Tooltip text on the toolbar button
    pub button_text: String,
    /// Reference systems offered in addition to the mandatory ones
    pub extra_crs: Vec<String>,
    /// Projection definition strings, keyed by reference system code
    pub crs_defs: HashMap<String, String>,
    /// Display names, keyed by reference system code
    pub crs_names: HashMap<String, String>,
    /// Path to the marker icon image
    pub icon_path: String,
    /// Zoom level applied after centering on a placed marker
    pub default_zoom: f64,
    /// Element id the widget attaches to; falls back to the host navigation
    /// area, then the document body
    pub attach_to: Option<String>,
    /// Reference system marker geometry is stored and drawn in
    pub projection_code: String,
    /// Label behavior when the secondary readout is unavailable
    pub secondary_readout: SecondaryReadout,
    /// Minimum log severity emitted by the widget
    pub log_level: LogLevel,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            button_text: "Find coordinates".to_string(),
            extra_crs: Vec::new(),
            crs_defs: HashMap::default(),
            crs_names: HashMap::default(),
            icon_path: "img/marker.png".to_string(),
            default_zoom: 20.0,
            attach_to: None,
            projection_code: crate::core::crs::WEB_MERCATOR.to_string(),
            secondary_readout: SecondaryReadout::default(),
            log_level: LogLevel::default(),
        }
    }
}
