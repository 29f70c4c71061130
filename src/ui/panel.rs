//! Coordinate input panel
//!
//! The panel is plain state: raw field text the host mirrors in as the user
//! types, and a `collect` step that parses it into workflow input. Rendering
//! and event wiring belong to the host toolkit.

use crate::core::dms::{DmsAngle, Hemisphere};
use crate::finder::CoordinateInput;

/// Raw DMS entry for one axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DmsFieldGroup {
    pub degrees: String,
    pub minutes: String,
    pub seconds: String,
    pub hemisphere: Hemisphere,
}

impl DmsFieldGroup {
    fn with_hemisphere(hemisphere: Hemisphere) -> Self {
        Self {
            hemisphere,
            ..Self::default()
        }
    }

    /// Parses the group; present only when the degree field is numeric.
    /// Blank or unparseable minutes/seconds count as zero.
    fn collect(&self) -> Option<DmsAngle> {
        let degrees = parse_number(&self.degrees)?;
        Some(DmsAngle::new(
            degrees,
            parse_number(&self.minutes).unwrap_or(0.0),
            parse_number(&self.seconds).unwrap_or(0.0),
            self.hemisphere,
        ))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// State of the coordinate input panel
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatePanel {
    /// Easting / longitude field
    pub x_field: String,
    /// Northing / latitude field
    pub y_field: String,
    /// Optional marker name
    pub label_field: String,
    pub latitude: DmsFieldGroup,
    pub longitude: DmsFieldGroup,
}

impl CoordinatePanel {
    pub fn new() -> Self {
        Self {
            x_field: String::new(),
            y_field: String::new(),
            label_field: String::new(),
            latitude: DmsFieldGroup::with_hemisphere(Hemisphere::North),
            longitude: DmsFieldGroup::with_hemisphere(Hemisphere::East),
        }
    }

    /// Parses the current field state into workflow input
    pub fn collect(&self) -> CoordinateInput {
        let label = self.label_field.trim();
        CoordinateInput {
            x: parse_number(&self.x_field),
            y: parse_number(&self.y_field),
            label: (!label.is_empty()).then(|| self.label_field.clone()),
            latitude: self.latitude.collect(),
            longitude: self.longitude.collect(),
        }
    }
}

impl Default for CoordinatePanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Events the host forwards from the rendered panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// The find/place button was clicked
    Find,
    /// The remove-markers button was clicked
    Clear,
    /// The close button was clicked
    Close,
    /// A reference system was picked from the dropdown
    CrsSelected(String),
}

/// Everything the host needs to render the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: String,
    /// `(code, display name)` pairs in presentation order
    pub crs_options: Vec<(String, String)>,
    pub selected_crs: String,
    /// Whether the DMS section starts out visible
    pub dms_visible: bool,
}
