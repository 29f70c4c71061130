//! The coordinate finder widget
//!
//! [`CoordinateFinder`] is the session object: it owns the configuration,
//! the reference-system registry, the transform chain, the marker layer
//! cache and the sequence counter, and runs the placement workflow end to
//! end. No failure escapes as an `Err`; every outcome is reported through
//! [`PlacementOutcome`] and the log.

use crate::core::config::{FinderConfig, SecondaryReadout};
use crate::core::crs::{CrsRegistry, SECONDARY_CRS};
use crate::core::dms::DmsAngle;
use crate::core::geo::{format_ordinate, CoordinatePair};
use crate::host::{HostBindings, MapAccess, SharedMap};
use crate::layers::cache::LayerCache;
use crate::layers::marker::{MarkerFeature, MarkerStyle};
use crate::macros::gated_log;
use crate::transform::providers::{EpsgTransform, HostTransform, RegisteredDefs};
use crate::transform::TransformChain;
use crate::ui::component::{
    AttachTarget, ButtonSpec, Component, ComponentId, Disposers, TooltipPlacement, UiHost,
};
use crate::ui::panel::{CoordinatePanel, PanelEvent, PanelView};
use crate::{FinderError, Result};
use log::Level;
use std::sync::Arc;

/// Decimal places in label readouts
const READOUT_DECIMALS: usize = 3;

/// Raw workflow input, as collected from the panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateInput {
    /// Easting / longitude in the active reference system
    pub x: Option<f64>,
    /// Northing / latitude in the active reference system
    pub y: Option<f64>,
    /// Optional marker name
    pub label: Option<String>,
    pub latitude: Option<DmsAngle>,
    pub longitude: Option<DmsAngle>,
}

/// How a placement attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed {
        feature_id: String,
        /// Whether the view could be centered; the marker stays placed
        /// either way
        centered: bool,
    },
    /// Non-numeric or non-finite coordinates
    InvalidInput,
    /// Geographic input outside |lat| <= 90, |lon| <= 180
    OutOfBounds,
    /// No provider could convert into the rendering target system
    TransformFailed,
    /// The live map instance could not be resolved
    MapUnavailable,
}

/// The coordinate search widget session
pub struct CoordinateFinder {
    config: FinderConfig,
    registry: Arc<CrsRegistry>,
    chain: TransformChain,
    access: MapAccess,
    cache: LayerCache,
    counter: u32,
    active_crs: String,
    panel: Option<CoordinatePanel>,
    panel_id: Option<ComponentId>,
    button: Option<ButtonSpec>,
    button_id: Option<ComponentId>,
    render_target: Option<String>,
    disposers: Disposers,
}

impl CoordinateFinder {
    /// Builds the widget session from configuration and host bindings.
    ///
    /// The transform chain is assembled here: the host utility first when
    /// one is bound, then built-in EPSG definitions, then definitions
    /// registered through configuration.
    pub fn new(config: FinderConfig, bindings: HostBindings) -> Self {
        let registry = Arc::new(CrsRegistry::from_config(&config));
        let active_crs = registry.default_crs().to_string();

        let mut chain = TransformChain::new(config.log_level);
        if let Some(utility) = bindings.transform_utility {
            chain = chain.with_provider(HostTransform::new(utility));
        }
        chain = chain
            .with_provider(EpsgTransform)
            .with_provider(RegisteredDefs::new(registry.clone()));

        Self {
            config,
            registry,
            chain,
            access: bindings.map_access,
            cache: LayerCache::new(),
            counter: 1,
            active_crs,
            panel: None,
            panel_id: None,
            button: None,
            button_id: None,
            render_target: None,
            disposers: Disposers::new(),
        }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn registry(&self) -> &CrsRegistry {
        &self.registry
    }

    /// The currently active input reference system
    pub fn active_crs(&self) -> &str {
        &self.active_crs
    }

    /// Sequence number the next placed marker will get
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn panel(&self) -> Option<&CoordinatePanel> {
        self.panel.as_ref()
    }

    /// Mutable panel state, for the host to mirror field edits into
    pub fn panel_mut(&mut self) -> Option<&mut CoordinatePanel> {
        self.panel.as_mut()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    /// Handle of the mounted toolbar button, once rendered
    pub fn button_id(&self) -> Option<ComponentId> {
        self.button_id
    }

    /// Whether the DMS section applies to the active reference system
    pub fn dms_applicable(&self) -> bool {
        self.registry.is_geographic(&self.active_crs)
    }

    /// Toolbar button click: open the panel, or close it when already open
    pub fn handle_button_click(&mut self, ui: &mut dyn UiHost) {
        if self.panel.is_some() {
            self.close_panel(ui);
        } else {
            self.open_panel(ui);
        }
    }

    pub fn open_panel(&mut self, ui: &mut dyn UiHost) {
        if self.panel.is_some() {
            return;
        }
        let view = self.panel_view();
        let id = ui.create_panel(&view);
        let target = self.resolve_attach_target(ui);
        ui.mount(id, &target);
        self.disposers.push(move |ui| ui.unmount(id));
        self.panel = Some(CoordinatePanel::new());
        self.panel_id = Some(id);
        gated_log!(self.config.log_level, Level::Info, "coordinate panel opened");
    }

    /// Closes the panel and releases everything registered while it was open
    pub fn close_panel(&mut self, ui: &mut dyn UiHost) {
        if self.panel.is_none() {
            return;
        }
        self.disposers.dispose(ui);
        self.panel = None;
        self.panel_id = None;
        gated_log!(
            self.config.log_level,
            Level::Info,
            "coordinate panel closed and listeners released"
        );
    }

    /// Reacts to an event the host forwarded from the rendered panel.
    ///
    /// Returns the placement outcome for [`PanelEvent::Find`], `None` for
    /// the rest.
    pub fn handle_panel_event(
        &mut self,
        event: PanelEvent,
        ui: &mut dyn UiHost,
    ) -> Option<PlacementOutcome> {
        match event {
            PanelEvent::Find => {
                let input = self
                    .panel
                    .as_ref()
                    .map(CoordinatePanel::collect)
                    .unwrap_or_default();
                Some(self.place(&input))
            }
            PanelEvent::Clear => {
                self.clear();
                None
            }
            PanelEvent::Close => {
                self.close_panel(ui);
                None
            }
            PanelEvent::CrsSelected(code) => {
                self.select_crs(&code, ui);
                None
            }
        }
    }

    /// Switches the active input reference system
    pub fn select_crs(&mut self, code: &str, ui: &mut dyn UiHost) {
        if !self.registry.contains(code) {
            gated_log!(
                self.config.log_level,
                Level::Warn,
                "unknown reference system {code} ignored"
            );
            return;
        }
        self.active_crs = code.to_string();
        if let Some(panel) = self.panel_id {
            ui.set_dms_visible(panel, self.registry.is_geographic(code));
        }
        gated_log!(
            self.config.log_level,
            Level::Info,
            "reference system changed to {code}"
        );
    }

    /// Runs the placement workflow: normalize, validate, transform, place
    /// the marker, center the view.
    pub fn place(&mut self, input: &CoordinateInput) -> PlacementOutcome {
        let level = self.config.log_level;

        // DMS entries take precedence over the projected fields when both
        // axes are present
        let (mut x, mut y) = (
            input.x.unwrap_or(f64::NAN),
            input.y.unwrap_or(f64::NAN),
        );
        if let (Some(lat), Some(lon)) = (input.latitude, input.longitude) {
            y = lat.to_decimal_degrees();
            x = lon.to_decimal_degrees();
            gated_log!(
                level,
                Level::Info,
                "DMS input converted to decimal degrees: x={x}, y={y}"
            );
        }

        if !x.is_finite() || !y.is_finite() {
            gated_log!(level, Level::Warn, "invalid coordinates, aborting placement");
            return PlacementOutcome::InvalidInput;
        }
        let pair = CoordinatePair::new(x, y);

        if self.registry.is_geographic(&self.active_crs) && !pair.within_geographic_bounds() {
            gated_log!(
                level,
                Level::Warn,
                "latitude/longitude outside the valid range, aborting placement"
            );
            return PlacementOutcome::OutOfBounds;
        }

        let input_crs = self.active_crs.clone();
        let target = match self
            .chain
            .transform(pair, &input_crs, &self.config.projection_code)
        {
            Some(out) => out,
            None => {
                gated_log!(
                    level,
                    Level::Error,
                    "conversion to {} produced no usable coordinate",
                    self.config.projection_code
                );
                return PlacementOutcome::TransformFailed;
            }
        };

        // label-only readout; a failure here never blocks the placement
        let secondary = self
            .chain
            .transform(pair, &input_crs, SECONDARY_CRS)
            .or_else(|| (input_crs == SECONDARY_CRS).then_some(pair));

        let label = self.compose_label(input.label.as_deref(), &input_crs, pair, secondary);

        let Some(map) = self.access.resolve() else {
            gated_log!(level, Level::Error, "map instance could not be resolved");
            return PlacementOutcome::MapUnavailable;
        };

        let feature_id = format!("coordinate-{}", self.counter);
        {
            let Ok(mut map_guard) = map.lock() else {
                gated_log!(level, Level::Error, "map instance is not accessible");
                return PlacementOutcome::MapUnavailable;
            };
            let style = MarkerStyle::with_icon(self.config.icon_path.clone());
            let layer =
                self.cache
                    .get_or_create(&mut *map_guard, &style, &self.config.projection_code);
            if let Ok(mut layer_guard) = layer.lock() {
                layer_guard.add_feature(
                    MarkerFeature::new(feature_id.clone(), target.to_point())
                        .with_property("label", label),
                );
            }
        }
        self.counter += 1;

        let centered = self.center_view(&map, target);
        PlacementOutcome::Placed {
            feature_id,
            centered,
        }
    }

    /// Clears the marker layer and resets the sequence counter.
    ///
    /// The counter only resets when a layer was actually found; clearing an
    /// empty session is a no-op.
    pub fn clear(&mut self) {
        let Some(map) = self.access.resolve() else {
            return;
        };
        let Ok(mut guard) = map.lock() else {
            return;
        };
        if self.cache.clear(&mut *guard) {
            self.counter = 1;
            gated_log!(
                self.config.log_level,
                Level::Info,
                "marker layer cleared and counter reset"
            );
        } else {
            gated_log!(self.config.log_level, Level::Info, "no marker layer to clear");
        }
    }

    fn panel_view(&self) -> PanelView {
        PanelView {
            title: "Coordinate search".to_string(),
            crs_options: self
                .registry
                .codes()
                .iter()
                .map(|code| (code.clone(), self.registry.display_name(code).to_string()))
                .collect(),
            selected_crs: self.active_crs.clone(),
            dms_visible: self.registry.is_geographic(&self.active_crs),
        }
    }

    fn compose_label(
        &self,
        user_label: Option<&str>,
        input_crs: &str,
        input: CoordinatePair,
        secondary: Option<CoordinatePair>,
    ) -> String {
        let mut lines = vec![self.counter.to_string()];
        if let Some(label) = user_label {
            let trimmed = label.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        lines.push(format!(
            "Input coordinate ({input_crs}): E: {} N: {}",
            format_ordinate(input.x, READOUT_DECIMALS),
            format_ordinate(input.y, READOUT_DECIMALS),
        ));
        let secondary_name = self.registry.display_name(SECONDARY_CRS);
        match secondary {
            Some(pair) => lines.push(format!(
                "{secondary_name} ({SECONDARY_CRS}): E: {} N: {}",
                format_ordinate(pair.x, READOUT_DECIMALS),
                format_ordinate(pair.y, READOUT_DECIMALS),
            )),
            None => {
                if self.config.secondary_readout == SecondaryReadout::Placeholder {
                    lines.push(format!("{secondary_name} ({SECONDARY_CRS}): unavailable"));
                }
            }
        }
        lines.join("\n")
    }

    /// Centers the view on `target`, converting into the view's own system
    /// when it differs from the rendering target. Retries once through the
    /// accessor chain before giving up.
    fn center_view(&self, map: &SharedMap, target: CoordinatePair) -> bool {
        if self.try_center(map, target) {
            gated_log!(
                self.config.log_level,
                Level::Info,
                "map centered on placed coordinate"
            );
            return true;
        }
        if let Some(fresh) = self.access.resolve() {
            if !Arc::ptr_eq(&fresh, map) && self.try_center(&fresh, target) {
                gated_log!(
                    self.config.log_level,
                    Level::Info,
                    "map centered through fallback accessor"
                );
                return true;
            }
        }
        gated_log!(
            self.config.log_level,
            Level::Error,
            "could not center map on placed coordinate"
        );
        false
    }

    fn try_center(&self, map: &SharedMap, target: CoordinatePair) -> bool {
        let Ok(guard) = map.lock() else {
            return false;
        };
        let Some(view) = guard.view() else {
            return false;
        };
        drop(guard);

        let Ok(mut view_guard) = view.lock() else {
            return false;
        };
        let center = match view_guard.projection() {
            Some(code) if code != self.config.projection_code => self
                .chain
                .transform(target, &self.config.projection_code, &code)
                // best effort: center with target coordinates when the view
                // system is out of reach
                .unwrap_or(target),
            _ => target,
        };
        view_guard.set_center(center);
        view_guard.set_zoom(self.config.default_zoom);
        true
    }

    fn resolve_attach_target(&self, ui: &dyn UiHost) -> AttachTarget {
        if let Some(id) = &self.config.attach_to {
            if ui.has_element(id) {
                return AttachTarget::Element(id.clone());
            }
        }
        if let Some(id) = &self.render_target {
            if ui.has_element(id) {
                return AttachTarget::Element(id.clone());
            }
        }
        gated_log!(
            self.config.log_level,
            Level::Warn,
            "render target not found, attaching to document body"
        );
        AttachTarget::Body
    }
}

impl Component for CoordinateFinder {
    fn name(&self) -> &str {
        "coordinate-finder"
    }

    fn on_init(&mut self) -> Result<()> {
        self.button = Some(ButtonSpec {
            class: "coordinate-finder-button padding-small icon-smaller round light box-shadow"
                .to_string(),
            icon: "#fa-map-marker".to_string(),
            tooltip: self.config.button_text.clone(),
            tooltip_placement: TooltipPlacement::East,
        });
        Ok(())
    }

    fn on_add(&mut self, ui: &mut dyn UiHost) -> Result<()> {
        if self.button.is_none() {
            self.on_init()?;
        }
        if self.render_target.is_none() {
            self.render_target = ui.navigation_target();
        }
        self.render(ui)?;
        gated_log!(
            self.config.log_level,
            Level::Info,
            "coordinate finder added; render target: {:?}",
            self.render_target
        );
        Ok(())
    }

    fn render(&mut self, ui: &mut dyn UiHost) -> Result<()> {
        let spec = self
            .button
            .clone()
            .ok_or_else(|| FinderError::Host("button was never initialized".to_string()))?;
        let id = ui.create_button(&spec);
        let target = self.resolve_attach_target(ui);
        ui.mount(id, &target);
        self.button_id = Some(id);
        Ok(())
    }
}
